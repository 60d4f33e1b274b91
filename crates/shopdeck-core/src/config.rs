// ── Gateway connection settings ──

use std::time::Duration;

use url::Url;

/// Connection settings for one API gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Gateway base URL (e.g. `http://localhost:8080`).
    pub url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept invalid TLS certificates (self-signed dev gateways).
    pub danger_accept_invalid_certs: bool,
    /// Background poll period in seconds. 0 disables polling.
    pub poll_interval_secs: u64,
}

impl GatewayConfig {
    /// Config with default timeout and poll period for the given URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(30),
            danger_accept_invalid_certs: false,
            poll_interval_secs: 5,
        }
    }
}
