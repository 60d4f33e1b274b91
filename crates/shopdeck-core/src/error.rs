// ── Core error types ──
//
// User-facing errors from shopdeck-core. These are NOT API-specific --
// consumers never see reqwest plumbing or JSON parse failures directly.
// The `From<shopdeck_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach gateway at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Gateway request timed out")]
    Timeout,

    // ── Input errors ─────────────────────────────────────────────────
    /// Client-side input rejected before any network call.
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Gateway error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Cancellation ─────────────────────────────────────────────────
    /// Superseded request or view teardown. Swallowed at the loader
    /// boundary, never shown to the user.
    #[error("operation cancelled")]
    Cancelled,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is a cooperative cancellation and
    /// should never reach a user-visible error state.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shopdeck_api::Error> for CoreError {
    fn from(err: shopdeck_api::Error) -> Self {
        match err {
            shopdeck_api::Error::Cancelled => CoreError::Cancelled,
            shopdeck_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            shopdeck_api::Error::Gateway {
                method,
                path,
                status,
                message,
            } => CoreError::Api {
                message: format!("{method} {path} failed: HTTP {status}: {message}"),
                status: Some(status),
            },
            shopdeck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            shopdeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
