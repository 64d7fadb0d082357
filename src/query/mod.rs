pub mod handlers;
pub mod views;

pub use handlers::QueryService;
pub use views::{AuctionOverview, AuctionView, OverviewPage, MAX_PAGE_SIZE};
