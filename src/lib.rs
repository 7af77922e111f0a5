pub mod auction;
pub mod bidding;
pub mod category;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod profile;
pub mod query;
pub mod response;
pub mod routes;
pub mod stats;
pub mod store;
pub mod telemetry;

pub use error::AdminError;
