// Integration tests for the `Gateway` orchestrator using wiremock.
//
// These exercise the observable contracts: all-settled fan-out with
// partial failure, last-issued-wins ordering, validation before any
// network call, follow-up refreshes after writes, and poll teardown.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopdeck_core::{
    DashboardSummary, Gateway, GatewayConfig, LoadPhase, SearchQuery,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn gateway_for(server: &MockServer) -> Gateway {
    let mut config = GatewayConfig::new(server.uri().parse().expect("mock server uri"));
    config.poll_interval_secs = 0;
    Gateway::new(config).expect("gateway construction")
}

fn orders_body() -> serde_json::Value {
    json!([
        { "id": 1, "customerName": "Martin Jimenez", "total": 25.5, "status": "PENDING" },
        { "id": 2, "customerName": "Ana Ruiz", "total": 80.0, "status": "NOTIFIED" },
    ])
}

fn products_body() -> serde_json::Value {
    json!([
        { "id": 1, "name": "Desk Chair", "price": 129.5, "stock": 3 },
        { "id": 2, "name": "Desk Lamp", "price": 35.0, "stock": 0 },
        { "id": 3, "name": "Monitor", "price": 249.0, "stock": 12 },
    ])
}

fn stats_body() -> serde_json::Value {
    json!({ "totalIndexed": 3, "inStock": 1, "lowStock": 1, "outOfStock": 1 })
}

async fn mount_get(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Partial failure ─────────────────────────────────────────────────

#[tokio::test]
async fn one_failed_resource_does_not_break_the_others() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/orders", orders_body()).await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_get(&server, "/api/catalog/search/stats", stats_body()).await;

    let gateway = gateway_for(&server);
    gateway.refresh_all().await;

    let store = gateway.store();
    let orders = store.orders_state();
    let products = store.products_state();
    let stats = store.stats_state();

    assert_eq!(orders.phase, LoadPhase::Loaded);
    assert_eq!(orders.data.as_ref().map(|o| o.len()), Some(2));

    assert!(products.error().is_some(), "catalog failure must surface");
    assert!(products.data.is_none(), "nothing was ever loaded");

    assert_eq!(stats.phase, LoadPhase::Loaded);

    // Aggregates over the loaded subset: order counts correct,
    // product-derived counts degrade to zero, no global error anywhere.
    let summary = DashboardSummary::compute(
        orders.data.as_deref().map(Vec::as_slice),
        products.data.as_deref().map(Vec::as_slice),
        stats.data.as_deref(),
    );
    assert_eq!(summary.orders.total, 2);
    assert_eq!(summary.orders.pending, 1);
    assert_eq!(summary.orders.notified, 1);
    assert_eq!(summary.stock.total, 0);
    assert_eq!(summary.index.total_indexed, 3);
}

#[tokio::test]
async fn failed_refresh_keeps_previously_loaded_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway.refresh_orders().await;
    gateway.refresh_orders().await;

    let state = gateway.store().orders_state();
    assert!(state.error().is_some());
    // Stale-while-error: the first load's data is still there.
    assert_eq!(state.data.as_ref().map(|o| o.len()), Some(2));
}

// ── Last-issued-wins ────────────────────────────────────────────────

#[tokio::test]
async fn a_superseded_load_cannot_overwrite_a_newer_one() {
    let server = MockServer::start().await;

    // First request to arrive gets the slow, stale payload…
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([
                    { "id": 1, "customerName": "stale", "total": 1.0, "status": "PENDING" }
                ]))
                .set_delay(Duration::from_millis(400)),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    // …every later request gets the fresh payload immediately.
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "customerName": "fresh", "total": 2.0, "status": "PENDING" }
        ])))
        .with_priority(2)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    // Load A goes out first, then load B supersedes it while A is
    // still in flight. A resolves last; its payload must be dropped.
    let first = {
        let gateway = gateway.clone();
        tokio::spawn(async move { gateway.refresh_orders().await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    gateway.refresh_orders().await;
    first.await.expect("first refresh task");

    let state = gateway.store().orders_state();
    assert_eq!(state.phase, LoadPhase::Loaded);
    let orders = state.data.expect("orders loaded");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].customer_name, "fresh");
}

// ── Mutations: validation before any network call ───────────────────

#[tokio::test]
async fn blank_customer_name_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway.create_order("   ", 10.0).await.unwrap_err();

    assert!(matches!(
        err,
        shopdeck_core::CoreError::ValidationFailed { .. }
    ));
    server.verify().await;
}

#[tokio::test]
async fn non_numeric_stock_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/catalog/products/7/stock"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    for bad in ["abc", "", "-3", "3.5"] {
        let err = gateway.update_stock(7, bad).await.unwrap_err();
        assert!(
            matches!(err, shopdeck_core::CoreError::ValidationFailed { .. }),
            "input {bad:?} should fail validation"
        );
    }
    server.verify().await;
}

// ── Mutations: follow-up refreshes ──────────────────────────────────

#[tokio::test]
async fn creating_an_order_refreshes_orders_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "customerName": "Ana Ruiz", "total": 42.0, "status": "PENDING"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders_body()))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let created = gateway.create_order("Ana Ruiz", 42.0).await.expect("create");

    assert_eq!(created.id, 9);
    assert_eq!(
        gateway.store().orders_state().data.map(|o| o.len()),
        Some(2)
    );
    server.verify().await;
}

#[tokio::test]
async fn a_successful_stock_update_refreshes_products_once() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/catalog/products/1/stock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "name": "Desk Chair", "price": 129.5, "stock": 20
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let updated = gateway.update_stock(1, " 20 ").await.expect("update");

    assert_eq!(updated.stock, 20);
    assert_eq!(gateway.store().products_state().phase, LoadPhase::Loaded);
    // The refresh latency is recorded for the cache hint.
    assert!(gateway.store().catalog_latency().is_some());
    server.verify().await;
}

#[tokio::test]
async fn sync_refreshes_stats_and_search_even_with_an_empty_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/catalog/search/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok", "productsIndexed": 3
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/search/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(gateway.store().active_query().is_empty());

    let report = gateway.sync_index().await.expect("sync");
    assert_eq!(report.products_indexed, 3);

    assert_eq!(gateway.store().stats_state().phase, LoadPhase::Loaded);
    assert_eq!(gateway.store().search_state().phase, LoadPhase::Loaded);
    server.verify().await;
}

// ── Search ──────────────────────────────────────────────────────────

#[tokio::test]
async fn search_stores_the_query_and_loads_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/search"))
        .and(query_param("q", "chair"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Desk Chair", "price": 129.5, "stock": 3, "stockStatus": "LOW" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway
        .search(SearchQuery {
            text: "chair".into(),
            ..SearchQuery::default()
        })
        .await;

    assert_eq!(gateway.store().active_query().text, "chair");
    let state = gateway.store().search_state();
    assert_eq!(state.phase, LoadPhase::Loaded);
    let hits = state.data.expect("search results");
    assert_eq!(hits[0].label, "LOW");
    server.verify().await;
}

// ── Polling & teardown ──────────────────────────────────────────────

#[tokio::test]
async fn disconnect_stops_the_poll_timer() {
    let server = MockServer::start().await;
    // Each endpoint may be hit exactly once: the initial load. If the
    // poll timer survived teardown it would fire again within 1s.
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/catalog/search/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = GatewayConfig::new(server.uri().parse().expect("mock server uri"));
    config.poll_interval_secs = 1;
    let gateway = Gateway::new(config).expect("gateway construction");

    gateway.connect().await;
    gateway.disconnect().await;

    // Wait past one polling interval; no further loads may occur.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    server.verify().await;
}

#[tokio::test]
async fn cancellation_on_disconnect_never_reaches_the_error_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(orders_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let refresh = {
        let gateway = gateway.clone();
        tokio::spawn(async move { gateway.refresh_orders().await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    gateway.disconnect().await;
    refresh.await.expect("refresh task");

    let state = gateway.store().orders_state();
    assert!(
        state.error().is_none(),
        "cancellation must not surface as a failure"
    );
    assert!(state.data.is_none());
}
