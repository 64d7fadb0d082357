pub mod auction;
pub mod bidding;
pub mod clock;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod query;
pub mod store;

pub use bidding::model::{AuctionId, AuctionItem, Originator, Pledge};
pub use engine::AuctionEngine;
pub use error::{EngineError, ErrorCode};
