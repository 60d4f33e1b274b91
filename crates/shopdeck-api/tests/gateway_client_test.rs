// Integration tests for `GatewayClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopdeck_api::types::{OrderCreate, StockLevel};
use shopdeck_api::{Error, GatewayClient, SearchQuery};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, GatewayClient) {
    let server = MockServer::start().await;
    let client = GatewayClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_orders() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": 1, "customerName": "Martin Jimenez", "total": 25.5, "status": "PENDING" },
        { "id": 2, "customerName": "Ana Ruiz", "total": 99.0, "status": "NOTIFIED" },
    ]);

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let orders = client.list_orders(&cancel).await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].customer_name, "Martin Jimenez");
    assert_eq!(orders[1].status, "NOTIFIED");
}

#[tokio::test]
async fn test_create_order_posts_camel_case_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(json!({ "customerName": "Ana Ruiz", "total": 42.0 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3, "customerName": "Ana Ruiz", "total": 42.0, "status": "PENDING"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let created = client
        .create_order(
            &OrderCreate {
                customer_name: "Ana Ruiz".into(),
                total: 42.0,
            },
            &cancel,
        )
        .await
        .unwrap();

    assert_eq!(created.id, 3);
    assert_eq!(created.status, "PENDING");
}

#[tokio::test]
async fn test_update_stock_sends_bare_integer_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/catalog/products/7/stock"))
        .and(body_json(json!(12)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "Desk Chair", "price": 129.5, "stock": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let product = client.update_stock(7, 12, &cancel).await.unwrap();

    assert_eq!(product.stock, 12);
}

#[tokio::test]
async fn test_search_sends_only_supplied_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/catalog/search"))
        .and(query_param("status", "LOW"))
        .and(query_param("maxPrice", "50"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "7", "name": "Desk Chair", "price": 49.5, "stock": 3, "stockStatus": "LOW" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let query = SearchQuery {
        text: "   ".into(),
        status: Some(StockLevel::Low),
        max_price: Some(50.0),
    };
    let hits = client.search_products(&query, &cancel).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].stock_status, "LOW");
}

#[tokio::test]
async fn test_search_with_empty_query_hits_bare_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/catalog/search"))
        .and(query_param_is_missing("q"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("maxPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let hits = client
        .search_products(&SearchQuery::all(), &cancel)
        .await
        .unwrap();

    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_sync_and_stats() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/catalog/search/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Sincronizacion completada", "productsIndexed": 14
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/catalog/search/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalIndexed": 14, "inStock": 10, "lowStock": 3, "outOfStock": 1
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let sync = client.sync_index(&cancel).await.unwrap();
    assert_eq!(sync.products_indexed, 14);

    let stats = client.search_stats(&cancel).await.unwrap();
    assert_eq!(stats.total_indexed, 14);
    assert_eq!(stats.out_of_stock, 1);
}

// ── Error taxonomy ──────────────────────────────────────────────────

#[tokio::test]
async fn test_non_2xx_yields_gateway_error_with_context() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "message": "order store down" })),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let err = client.list_orders(&cancel).await.unwrap_err();

    match err {
        Error::Gateway {
            method,
            path,
            status,
            message,
        } => {
            assert_eq!(method, "GET");
            assert_eq!(path, "/api/orders");
            assert_eq!(status, 503);
            assert_eq!(message, "order store down");
        }
        other => panic!("expected Gateway error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_json_body_falls_back_to_status_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/catalog/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let err = client.list_products(&cancel).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!err.is_cancelled());
}

#[tokio::test]
async fn test_malformed_body_yields_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let err = client.list_orders(&cancel).await.unwrap_err();

    assert!(matches!(err, Error::Deserialization { .. }));
}

// ── Cancellation ────────────────────────────────────────────────────

#[tokio::test]
async fn test_pre_cancelled_token_never_issues_the_call() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client.list_orders(&cancel).await.unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_cancelling_an_in_flight_call_resolves_to_cancelled() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let call = {
        let client = client.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { client.list_orders(&cancel).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    let err = call.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
}
