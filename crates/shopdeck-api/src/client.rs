// Hand-crafted async HTTP client for the commerce API gateway.
//
// All backend services (orders, catalog, search) sit behind a single
// gateway; every operation is JSON over REST under /api/.

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::query::SearchQuery;
use crate::transport::TransportConfig;
use crate::types::{
    IndexStatsDto, OrderCreate, OrderDto, ProductDto, SearchHitDto, SyncResponseDto,
};

// ── Error response shape from the gateway ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the commerce API gateway.
///
/// Stateless beyond the connection pool: each method performs exactly
/// one HTTP call and parses the JSON response. Any 2xx yields the parsed
/// body; any other status yields [`Error::Gateway`] carrying method,
/// path, and status code.
///
/// Cancellation is cooperative: every call takes a
/// [`CancellationToken`] and races it against the request. A call whose
/// token fires first resolves to [`Error::Cancelled`], which callers
/// swallow rather than surface.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GatewayClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a gateway base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/` so relative joins behave.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// Join an absolute-style path (e.g. `/api/orders`) onto the base.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        self.execute("GET", path, self.http.get(url), cancel).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        self.execute("GET", path, self.http.get(url).query(params), cancel)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        self.execute("POST", path, self.http.post(url).json(body), cancel)
            .await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        self.execute("PUT", path, self.http.put(url).json(body), cancel)
            .await
    }

    // ── Request execution ────────────────────────────────────────────

    /// Run a request, racing it against the caller's cancellation token.
    ///
    /// Biased toward cancellation so an already-cancelled token never
    /// issues the call at all.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        req: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let fut = async {
            let resp = req.send().await?;
            self.handle_response(method, path, resp).await
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("{method} {path} cancelled");
                Err(Error::Cancelled)
            }
            result = fut => result,
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(method, path, status, resp).await)
        }
    }

    async fn parse_error(
        &self,
        method: &'static str,
        path: &str,
        status: reqwest::StatusCode,
        resp: reqwest::Response,
    ) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                message: Some(message),
            }) => message,
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Gateway {
            method,
            path: path.to_owned(),
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Orders ───────────────────────────────────────────────────────

    pub async fn list_orders(&self, cancel: &CancellationToken) -> Result<Vec<OrderDto>, Error> {
        self.get("/api/orders", cancel).await
    }

    pub async fn create_order(
        &self,
        body: &OrderCreate,
        cancel: &CancellationToken,
    ) -> Result<OrderDto, Error> {
        self.post("/api/orders", body, cancel).await
    }

    // ── Catalog ──────────────────────────────────────────────────────

    pub async fn list_products(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProductDto>, Error> {
        self.get("/api/catalog/products", cancel).await
    }

    /// Set a product's stock count. The gateway takes the bare integer
    /// as the request body.
    pub async fn update_stock(
        &self,
        product_id: i64,
        stock: u32,
        cancel: &CancellationToken,
    ) -> Result<ProductDto, Error> {
        self.put(
            &format!("/api/catalog/products/{product_id}/stock"),
            &stock,
            cancel,
        )
        .await
    }

    // ── Search ───────────────────────────────────────────────────────

    /// Run a full-text search. Only the criteria present in `query` are
    /// sent; an empty query returns everything the index holds.
    pub async fn search_products(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchHitDto>, Error> {
        let params = query.params();
        if params.is_empty() {
            self.get("/api/catalog/search", cancel).await
        } else {
            self.get_with_params("/api/catalog/search", &params, cancel)
                .await
        }
    }

    /// Trigger a full re-index of the catalog into the search index.
    pub async fn sync_index(&self, cancel: &CancellationToken) -> Result<SyncResponseDto, Error> {
        self.post("/api/catalog/search/sync", &serde_json::json!({}), cancel)
            .await
    }

    pub async fn search_stats(&self, cancel: &CancellationToken) -> Result<IndexStatsDto, Error> {
        self.get("/api/catalog/search/stats", cancel).await
    }
}
