// ── Gateway abstraction ──
//
// Full lifecycle management for a dashboard's connection to the API
// gateway: initial load, per-resource refresh with last-issued-wins
// sequencing, validated mutations with follow-up refreshes, and the
// background polling loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use shopdeck_api::types::OrderCreate;
use shopdeck_api::{GatewayClient, SearchQuery, TransportConfig};

use crate::config::GatewayConfig;
use crate::error::CoreError;
use crate::model::{Order, Product, SearchResult};

use crate::store::DataStore;

/// Outcome of a re-index request.
#[derive(Debug, Clone, Copy)]
pub struct SyncReport {
    /// How many products the backend pushed into the search index.
    pub products_indexed: u64,
    /// Wall-clock time of the sync call. Feeds the display-only cache
    /// hint; never consulted by correctness logic.
    pub elapsed: Duration,
}

// ── Gateway ──────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<GatewayInner>`. Owns the HTTP client, the
/// reactive [`DataStore`], and the background polling task. All loaders
/// are safe to invoke repeatedly and concurrently with themselves: a
/// newly issued load supersedes an older in-flight one through the
/// store's ticket discipline, and cancellation never surfaces as a
/// user-visible error.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    config: GatewayConfig,
    client: GatewayClient,
    store: Arc<DataStore>,
    cancel: CancellationToken,
    /// Child token for the current connection — cancelled on disconnect,
    /// replaced on reconnect (avoids permanent cancellation).
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Gateway {
    /// Create a new Gateway from configuration. Does NOT load anything --
    /// call [`connect()`](Self::connect) to fetch the initial snapshot
    /// and start the polling task.
    pub fn new(config: GatewayConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            danger_accept_invalid_certs: config.danger_accept_invalid_certs,
        };
        let client = GatewayClient::new(config.url.as_str(), &transport)?;

        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Ok(Self {
            inner: Arc::new(GatewayInner {
                config,
                client,
                store: Arc::new(DataStore::new()),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Connection lifecycle ─────────────────────────────────────────

    /// Perform the initial load and spawn the polling task.
    ///
    /// The initial load is all-settled: a service that is down marks
    /// only its own resource as failed, so connecting never errors.
    pub async fn connect(&self) {
        // Fresh child token for this connection (supports reconnect).
        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        self.refresh_all().await;

        let interval_secs = self.inner.config.poll_interval_secs;
        if interval_secs > 0 {
            let gateway = self.clone();
            let mut handles = self.inner.task_handles.lock().await;
            handles.push(tokio::spawn(poll_task(gateway, interval_secs, child)));
        }

        info!(url = %self.inner.config.url, "connected to gateway");
    }

    /// Tear down: cancel outstanding requests and stop polling.
    ///
    /// Cancelled in-flight loads are swallowed — they never land in a
    /// resource's error state, and no poll tick fires afterwards.
    pub async fn disconnect(&self) {
        // Cancel the child token (not the parent — allows reconnect).
        self.inner.cancel_child.lock().await.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        debug!("disconnected from gateway");
    }

    async fn child_token(&self) -> CancellationToken {
        self.inner.cancel_child.lock().await.clone()
    }

    // ── Resource loaders ─────────────────────────────────────────────

    /// Refresh the orders collection.
    pub async fn refresh_orders(&self) {
        let ticket = self.inner.store.orders.begin();
        let cancel = self.child_token().await;

        match self.inner.client.list_orders(&cancel).await {
            Ok(dtos) => {
                let orders: Vec<Order> = dtos.into_iter().map(Order::from).collect();
                debug!(count = orders.len(), "orders refreshed");
                self.inner.store.orders.finish(ticket, orders);
            }
            Err(e) if e.is_cancelled() => debug!("orders refresh cancelled"),
            Err(e) => {
                warn!(error = %e, "orders refresh failed");
                self.inner.store.orders.fail(ticket, e.to_string());
            }
        }
    }

    /// Refresh the product catalog, recording the fetch latency for the
    /// cache hint.
    pub async fn refresh_products(&self) {
        let ticket = self.inner.store.products.begin();
        let cancel = self.child_token().await;
        let started = Instant::now();

        match self.inner.client.list_products(&cancel).await {
            Ok(dtos) => {
                let elapsed = started.elapsed();
                let products: Vec<Product> = dtos.into_iter().map(Product::from).collect();
                debug!(count = products.len(), ?elapsed, "catalog refreshed");
                if self.inner.store.products.finish(ticket, products) {
                    let _ = self.inner.store.catalog_latency.send(Some(elapsed));
                }
            }
            Err(e) if e.is_cancelled() => debug!("catalog refresh cancelled"),
            Err(e) => {
                warn!(error = %e, "catalog refresh failed");
                self.inner.store.products.fail(ticket, e.to_string());
            }
        }
    }

    /// Re-run the currently active search query.
    pub async fn refresh_search(&self) {
        let ticket = self.inner.store.search.begin();
        let query = self.inner.store.active_query();
        let cancel = self.child_token().await;

        match self.inner.client.search_products(&query, &cancel).await {
            Ok(dtos) => {
                let results: Vec<SearchResult> =
                    dtos.into_iter().map(SearchResult::from).collect();
                debug!(count = results.len(), query = %query.query_string(), "search refreshed");
                self.inner.store.search.finish(ticket, results);
            }
            Err(e) if e.is_cancelled() => debug!("search refresh cancelled"),
            Err(e) => {
                warn!(error = %e, "search failed");
                self.inner.store.search.fail(ticket, e.to_string());
            }
        }
    }

    /// Refresh the search index statistics.
    pub async fn refresh_stats(&self) {
        let ticket = self.inner.store.stats.begin();
        let cancel = self.child_token().await;

        match self.inner.client.search_stats(&cancel).await {
            Ok(dto) => {
                self.inner.store.stats.finish(ticket, dto.into());
            }
            Err(e) if e.is_cancelled() => debug!("stats refresh cancelled"),
            Err(e) => {
                warn!(error = %e, "stats refresh failed");
                self.inner.store.stats.fail(ticket, e.to_string());
            }
        }
    }

    /// Fetch every dashboard resource concurrently.
    ///
    /// All-settled semantics: the branches are independent, each applies
    /// success or failure to its own cell, and completion order between
    /// resources carries no meaning.
    pub async fn refresh_all(&self) {
        tokio::join!(
            self.refresh_orders(),
            self.refresh_products(),
            self.refresh_stats(),
        );
        let _ = self
            .inner
            .store
            .last_full_refresh
            .send(Some(chrono::Utc::now()));
    }

    /// Run a search: store `query` as the active one, then load results.
    ///
    /// Rapid re-searches resolve through the same last-issued-wins
    /// sequencing as every other load on the search resource.
    pub async fn search(&self, query: SearchQuery) {
        let _ = self.inner.store.active_query.send(query);
        self.refresh_search().await;
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create an order, then refresh the orders collection.
    ///
    /// A blank customer name is rejected before any network call. On
    /// failure nothing is refreshed — the caller keeps its form input.
    pub async fn create_order(&self, customer_name: &str, total: f64) -> Result<Order, CoreError> {
        let name = customer_name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("customer name is required"));
        }
        if !total.is_finite() || total < 0.0 {
            return Err(CoreError::validation("total must be a non-negative amount"));
        }

        let cancel = self.child_token().await;
        let created = self
            .inner
            .client
            .create_order(
                &OrderCreate {
                    customer_name: name.to_owned(),
                    total,
                },
                &cancel,
            )
            .await?;
        info!(order_id = created.id, "order created");

        self.refresh_orders().await;
        Ok(Order::from(created))
    }

    /// Parse and apply a stock update, then refresh the catalog.
    ///
    /// `raw` must parse as a non-negative integer; anything else is
    /// rejected before any network call so the caller can stay in edit
    /// mode and retry.
    pub async fn update_stock(&self, product_id: i64, raw: &str) -> Result<Product, CoreError> {
        let stock: u32 = raw.trim().parse().map_err(|_| {
            CoreError::validation(format!("'{}' is not a valid stock count", raw.trim()))
        })?;

        let cancel = self.child_token().await;
        let updated = self
            .inner
            .client
            .update_stock(product_id, stock, &cancel)
            .await?;
        info!(product_id, stock, "stock updated");

        self.refresh_products().await;
        Ok(Product::from(updated))
    }

    /// Trigger a full re-index, then refresh both the index stats and
    /// the current search results — even when no query is active.
    pub async fn sync_index(&self) -> Result<SyncReport, CoreError> {
        let cancel = self.child_token().await;
        let started = Instant::now();
        let resp = self.inner.client.sync_index(&cancel).await?;
        let elapsed = started.elapsed();
        info!(products_indexed = resp.products_indexed, ?elapsed, "index synced");

        tokio::join!(self.refresh_stats(), self.refresh_search());

        Ok(SyncReport {
            products_indexed: resp.products_indexed,
            elapsed,
        })
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Periodic refresh loop.
///
/// Consumes the interval's immediate first tick (connect already did the
/// initial load), then refreshes everything each period until cancelled.
/// Manual refreshes and poll ticks feed the same cells, so overlapping
/// triggers resolve through the ticket discipline rather than racing.
async fn poll_task(gateway: Gateway, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                gateway.refresh_all().await;
            }
        }
    }
}
