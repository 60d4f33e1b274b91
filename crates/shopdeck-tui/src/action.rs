//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::time::Duration;

use shopdeck_core::{
    IndexStats, Order, Product, ResourceState, SearchQuery, SearchResult, SyncReport,
};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification shown in the status line.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Data Events (from shopdeck-core watch channels) ───────────
    OrdersUpdated(ResourceState<Vec<Order>>),
    ProductsUpdated(ResourceState<Vec<Product>>),
    SearchUpdated(ResourceState<Vec<SearchResult>>),
    StatsUpdated(ResourceState<IndexStats>),
    /// Latency of the last catalog fetch — cache-hint input only.
    CatalogLatency(Duration),

    // ── Loader triggers ───────────────────────────────────────────
    RefreshAll,
    RefreshOrders,
    RefreshProducts,
    RefreshSearch,

    // ── Order creation ────────────────────────────────────────────
    /// Submit the create-order form. `total` is the raw field text.
    CreateOrder { customer_name: String, total: String },
    OrderCreated(Order),
    OrderCreateFailed(String),

    // ── Stock editing ─────────────────────────────────────────────
    /// Submit a stock edit. `raw` is the raw field text.
    UpdateStock { product_id: i64, raw: String },
    StockUpdated(Product),
    StockUpdateFailed(String),

    // ── Search ────────────────────────────────────────────────────
    SubmitSearch(SearchQuery),

    // ── Index sync ────────────────────────────────────────────────
    TriggerSync,
    SyncCompleted(SyncReport),
    SyncFailed(String),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
