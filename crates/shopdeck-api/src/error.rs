use thiserror::Error;

/// Top-level error type for the `shopdeck-api` crate.
///
/// Covers every failure mode at the HTTP boundary: transport faults,
/// non-2xx gateway responses, cooperative cancellation, and bad payloads.
/// `shopdeck-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Gateway ─────────────────────────────────────────────────────
    /// Non-2xx response from the gateway.
    #[error("{method} {path} failed: HTTP {status}: {message}")]
    Gateway {
        method: &'static str,
        path: String,
        status: u16,
        message: String,
    },

    // ── Cancellation ────────────────────────────────────────────────
    /// The call was cancelled before completion (superseded request or
    /// view teardown). Never surfaced to the user.
    #[error("request cancelled")]
    Cancelled,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error is a cooperative cancellation.
    ///
    /// Callers swallow these instead of surfacing them as failures.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Gateway { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }
}
