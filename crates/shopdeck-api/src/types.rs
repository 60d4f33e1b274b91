// Wire types for the gateway API.
//
// Field names follow the gateway's camelCase JSON; these are transport
// shapes only — `shopdeck-core` converts them into domain types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ── Stock classification ─────────────────────────────────────────────

/// Stock level buckets shared by the catalog and the search index.
///
/// The wire representation is the SCREAMING_SNAKE string the search
/// service uses for its `stockStatus` field and `status` query param.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockLevel {
    Ok,
    Low,
    OutOfStock,
}

impl StockLevel {
    /// Classify a raw stock count.
    ///
    /// Exhaustive and non-overlapping: 0 is out of stock, 1..=5 is low,
    /// anything above is ok. Every display site derives its badge from
    /// this one function.
    pub fn classify(stock: u32) -> Self {
        match stock {
            0 => Self::OutOfStock,
            1..=5 => Self::Low,
            _ => Self::Ok,
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────

/// An order as returned by the order service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i64,
    pub customer_name: String,
    #[serde(default)]
    pub total: f64,
    /// Backend-driven status string ("PENDING", "NOTIFIED", ...). The
    /// async notifier flips it out-of-band; clients only observe.
    pub status: String,
}

/// Request body for creating an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub customer_name: String,
    pub total: f64,
}

// ── Catalog ──────────────────────────────────────────────────────────

/// A product as returned by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
}

// ── Search ───────────────────────────────────────────────────────────

/// A search hit from the full-text index.
///
/// Same shape as a product plus the index's own `stockStatus` label.
/// The document id is a string — the index keys documents by the
/// stringified catalog id. The label is kept verbatim; it is the
/// search service's opinion and may lag the catalog's stock count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub stock_status: String,
}

/// Aggregate counts over the search index. Read-only snapshot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatsDto {
    pub total_indexed: u64,
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
}

/// Response from triggering a full re-index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponseDto {
    #[serde(default)]
    pub message: String,
    pub products_indexed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_exhaustive_and_non_overlapping() {
        assert_eq!(StockLevel::classify(0), StockLevel::OutOfStock);
        assert_eq!(StockLevel::classify(1), StockLevel::Low);
        assert_eq!(StockLevel::classify(5), StockLevel::Low);
        assert_eq!(StockLevel::classify(6), StockLevel::Ok);
        assert_eq!(StockLevel::classify(u32::MAX), StockLevel::Ok);
    }

    #[test]
    fn stock_level_round_trips_the_wire_strings() {
        assert_eq!(StockLevel::Ok.to_string(), "OK");
        assert_eq!(StockLevel::Low.to_string(), "LOW");
        assert_eq!(StockLevel::OutOfStock.to_string(), "OUT_OF_STOCK");
        assert_eq!("OUT_OF_STOCK".parse(), Ok(StockLevel::OutOfStock));
        assert!("SOLD_OUT".parse::<StockLevel>().is_err());
    }

    #[test]
    fn search_hit_deserializes_index_documents() {
        let hit: SearchHitDto = serde_json::from_str(
            r#"{"id":"7","name":"Desk Chair","price":129.5,"stock":3,"stockStatus":"LOW"}"#,
        )
        .expect("valid document");
        assert_eq!(hit.id, "7");
        assert_eq!(hit.stock, 3);
        assert_eq!(hit.stock_status, "LOW");
    }
}
