//! Reactive data layer between `shopdeck-api` and UI consumers.
//!
//! This crate owns the client-side orchestration for the dashboard:
//!
//! - **[`Gateway`]** — Central facade managing the connection lifecycle:
//!   [`connect()`](Gateway::connect) performs the initial all-settled
//!   load and spawns the background polling task;
//!   [`disconnect()`](Gateway::disconnect) cancels outstanding requests
//!   and stops polling. Mutations validate input before any network call
//!   and re-synchronize the affected resources on success.
//!
//! - **[`DataStore`]** — One reactive cell per resource (orders,
//!   products, search results, index stats). Each cell tracks a
//!   tri-state load phase, retains stale data across failed refreshes,
//!   and enforces last-issued-wins ordering so an old in-flight response
//!   can never overwrite a newer one.
//!
//! - **[`ResourceWatch<T>`]** — Subscription handle vended by the
//!   `DataStore`. Exposes `current()` / `latest()` / `changed()` for
//!   reactive rendering.
//!
//! - **Aggregation** ([`aggregate`]) — Pure derivations over loaded
//!   resources (order tallies, stock tallies, cache hints) that tolerate
//!   any subset of sources being absent.
//!
//! - **Domain model** ([`model`]) — Canonical types (`Order`, `Product`,
//!   `SearchResult`, `IndexStats`) converted from the gateway's wire
//!   shapes.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::{CacheHint, DashboardSummary, OrderTally, StockTally};
pub use config::GatewayConfig;
pub use error::CoreError;
pub use gateway::{Gateway, SyncReport};
pub use store::{DataStore, LoadPhase, ResourceState};
pub use stream::ResourceWatch;

// Re-export model and query types at the crate root for ergonomics.
pub use model::{IndexStats, Order, OrderStatus, Product, SearchResult, StockLevel};
pub use shopdeck_api::SearchQuery;
