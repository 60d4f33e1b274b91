//! Data bridge — connects [`Gateway`] watch channels to TUI actions.
//!
//! Runs as a background task: performs the initial connect, then
//! forwards every resource-state change as an [`Action`] through the
//! TUI's action channel until cancelled.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use shopdeck_core::Gateway;

use crate::action::Action;

/// Bridge the gateway's reactive store into the TUI action loop.
///
/// Connects (initial all-settled load + polling), pushes initial
/// snapshots so screens have data immediately, then loops forwarding
/// every change. Shuts the gateway down cleanly on cancellation.
pub async fn spawn_data_bridge(
    gateway: Gateway,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    gateway.connect().await;

    let store = gateway.store().clone();
    let mut orders = store.subscribe_orders();
    let mut products = store.subscribe_products();
    let mut search = store.subscribe_search();
    let mut stats = store.subscribe_stats();
    let mut latency = store.subscribe_catalog_latency();

    // Push initial snapshots so screens have data immediately
    let _ = action_tx.send(Action::OrdersUpdated(orders.current().clone()));
    let _ = action_tx.send(Action::ProductsUpdated(products.current().clone()));
    let _ = action_tx.send(Action::SearchUpdated(search.current().clone()));
    let _ = action_tx.send(Action::StatsUpdated(stats.current().clone()));

    // Stream loop — forward every change until cancelled
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(state) = orders.changed() => {
                let _ = action_tx.send(Action::OrdersUpdated(state));
            }
            Some(state) = products.changed() => {
                let _ = action_tx.send(Action::ProductsUpdated(state));
            }
            Some(state) = search.changed() => {
                let _ = action_tx.send(Action::SearchUpdated(state));
            }
            Some(state) = stats.changed() => {
                let _ = action_tx.send(Action::StatsUpdated(state));
            }
            Ok(()) = latency.changed() => {
                if let Some(elapsed) = *latency.borrow_and_update() {
                    let _ = action_tx.send(Action::CatalogLatency(elapsed));
                }
            }
        }
    }

    gateway.disconnect().await;
    debug!("data bridge shut down");
}
