pub mod aggregate;
pub mod model;

pub use aggregate::{aggregate, bids_per_hour, BidSummary};
pub use model::Bid;
