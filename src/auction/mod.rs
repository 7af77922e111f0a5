pub mod model;
pub mod status;

pub use model::{Auction, AuctionDuration, AuctionType, NewAuction, SaleType};
pub use status::{classify, AuctionStatus};
