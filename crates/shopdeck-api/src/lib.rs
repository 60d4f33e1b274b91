// shopdeck-api: Async Rust client for the shopdeck commerce API gateway

pub mod client;
pub mod error;
pub mod query;
pub mod transport;
pub mod types;

pub use client::GatewayClient;
pub use error::Error;
pub use query::SearchQuery;
pub use transport::TransportConfig;
pub use types::StockLevel;
