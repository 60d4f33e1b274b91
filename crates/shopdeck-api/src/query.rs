// Search query composition.
//
// Turns free-text + optional filters into the canonical parameter list
// for `GET /api/catalog/search`. Only criteria the user actually
// supplied are sent: blank text and unset filters are omitted entirely,
// never sent as empty values.

use crate::types::StockLevel;

/// A composed search request: free text plus optional filters.
///
/// Composition is idempotent — the same logical inputs always produce
/// the same parameter list, in the same order (`q`, `status`,
/// `maxPrice`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Free-text match against the product name. Whitespace-only text
    /// counts as absent.
    pub text: String,
    /// Filter on the index's stock-status label.
    pub status: Option<StockLevel>,
    /// Upper price bound, inclusive.
    pub max_price: Option<f64>,
}

impl SearchQuery {
    /// Query matching everything the index holds (no criteria).
    pub fn all() -> Self {
        Self::default()
    }

    /// The parameter pairs to send, in canonical order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);

        let text = self.text.trim();
        if !text.is_empty() {
            params.push(("q", text.to_owned()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(max_price) = self.max_price {
            params.push(("maxPrice", max_price.to_string()));
        }

        params
    }

    /// Canonical `k=v&k=v` rendering, for display and logging.
    ///
    /// Values are raw here — percent-encoding happens at the transport
    /// layer when the request is built.
    pub fn query_string(&self) -> String {
        self.params()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Whether any criterion would be sent at all.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.status.is_none() && self.max_price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_only_yields_just_q() {
        let query = SearchQuery {
            text: "chair".into(),
            ..SearchQuery::default()
        };
        assert_eq!(query.query_string(), "q=chair");
    }

    #[test]
    fn filters_without_text_omit_q_entirely() {
        let query = SearchQuery {
            text: String::new(),
            status: Some(StockLevel::Low),
            max_price: Some(50.0),
        };
        assert_eq!(query.query_string(), "status=LOW&maxPrice=50");
    }

    #[test]
    fn whitespace_only_text_counts_as_absent() {
        let query = SearchQuery {
            text: "   ".into(),
            ..SearchQuery::default()
        };
        assert!(query.is_empty());
        assert!(query.params().is_empty());
        assert_eq!(query.query_string(), "");
    }

    #[test]
    fn text_is_trimmed_before_sending() {
        let query = SearchQuery {
            text: "  desk lamp  ".into(),
            ..SearchQuery::default()
        };
        assert_eq!(query.params(), vec![("q", "desk lamp".to_owned())]);
    }

    #[test]
    fn composition_is_idempotent_and_ordered() {
        let query = SearchQuery {
            text: "chair".into(),
            status: Some(StockLevel::Ok),
            max_price: Some(129.5),
        };
        let first = query.query_string();
        let second = query.query_string();
        assert_eq!(first, second);
        assert_eq!(first, "q=chair&status=OK&maxPrice=129.5");
    }
}
