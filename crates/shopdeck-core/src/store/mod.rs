// ── Central reactive data store ──
//
// One cell per dashboard resource. Each resource loads independently,
// fails independently, and broadcasts its state to subscribers via
// `watch` channels. UI state is owned here; no other shared mutable
// state exists.

mod resource;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use shopdeck_api::SearchQuery;

use crate::model::{IndexStats, Order, Product, SearchResult};
use crate::stream::ResourceWatch;

pub use resource::{LoadPhase, LoadTicket, ResourceCell, ResourceState};

/// Central reactive store for all dashboard resources.
///
/// Resources are independent: each has its own tri-state load phase and
/// last-issued-wins sequencing, and one resource failing never touches
/// its siblings.
pub struct DataStore {
    pub(crate) orders: ResourceCell<Vec<Order>>,
    pub(crate) products: ResourceCell<Vec<Product>>,
    pub(crate) search: ResourceCell<Vec<SearchResult>>,
    pub(crate) stats: ResourceCell<IndexStats>,
    /// The query the search results currently reflect. Re-used by the
    /// sync flow to refresh results even when no criteria are set.
    pub(crate) active_query: watch::Sender<SearchQuery>,
    /// Wall-clock latency of the last catalog fetch. Input to the
    /// display-only cache hint; nothing else reads it.
    pub(crate) catalog_latency: watch::Sender<Option<Duration>>,
    pub(crate) last_full_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (active_query, _) = watch::channel(SearchQuery::all());
        let (catalog_latency, _) = watch::channel(None);
        let (last_full_refresh, _) = watch::channel(None);

        Self {
            orders: ResourceCell::new(),
            products: ResourceCell::new(),
            search: ResourceCell::new(),
            stats: ResourceCell::new(),
            active_query,
            catalog_latency,
            last_full_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn orders_state(&self) -> ResourceState<Vec<Order>> {
        self.orders.snapshot()
    }

    pub fn products_state(&self) -> ResourceState<Vec<Product>> {
        self.products.snapshot()
    }

    pub fn search_state(&self) -> ResourceState<Vec<SearchResult>> {
        self.search.snapshot()
    }

    pub fn stats_state(&self) -> ResourceState<IndexStats> {
        self.stats.snapshot()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_orders(&self) -> ResourceWatch<Vec<Order>> {
        ResourceWatch::new(self.orders.subscribe())
    }

    pub fn subscribe_products(&self) -> ResourceWatch<Vec<Product>> {
        ResourceWatch::new(self.products.subscribe())
    }

    pub fn subscribe_search(&self) -> ResourceWatch<Vec<SearchResult>> {
        ResourceWatch::new(self.search.subscribe())
    }

    pub fn subscribe_stats(&self) -> ResourceWatch<IndexStats> {
        ResourceWatch::new(self.stats.subscribe())
    }

    pub fn subscribe_catalog_latency(&self) -> watch::Receiver<Option<Duration>> {
        self.catalog_latency.subscribe()
    }

    // ── Search query ─────────────────────────────────────────────────

    /// The query the current search results reflect.
    pub fn active_query(&self) -> SearchQuery {
        self.active_query.borrow().clone()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    /// Latency of the most recent catalog fetch, if any.
    pub fn catalog_latency(&self) -> Option<Duration> {
        *self.catalog_latency.borrow()
    }

    pub fn last_full_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_full_refresh.borrow()
    }

    /// How long ago the last full refresh occurred, or `None` if never.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_full_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

// Arc convenience so consumers can hold the store without the gateway.
impl DataStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}
