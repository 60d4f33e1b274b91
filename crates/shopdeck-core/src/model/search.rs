// ── Search domain types ──

use serde::{Deserialize, Serialize};

use shopdeck_api::StockLevel;
use shopdeck_api::types::{IndexStatsDto, SearchHitDto};

/// A full-text search hit.
///
/// Same shape as a [`Product`](super::Product) plus the stock-status
/// label the search service computed at index time. The label is kept
/// verbatim: the index may lag the catalog, so it is not guaranteed to
/// match what [`StockLevel::classify`] would derive from `stock`. The
/// search view displays the label; the catalog view derives locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Index document id (the stringified catalog id).
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    /// The server's verbatim stock-status label.
    pub label: String,
}

impl SearchResult {
    /// The server's label parsed into a level, when it names one.
    pub fn server_level(&self) -> Option<StockLevel> {
        self.label.parse().ok()
    }

    /// What the local classifier would say about the raw count.
    pub fn local_level(&self) -> StockLevel {
        StockLevel::classify(self.stock)
    }
}

impl From<SearchHitDto> for SearchResult {
    fn from(dto: SearchHitDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            price: dto.price,
            stock: dto.stock,
            label: dto.stock_status,
        }
    }
}

/// Aggregate counts over the search index. Read-only snapshot, replaced
/// wholesale on every stats refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_indexed: u64,
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
}

impl From<IndexStatsDto> for IndexStats {
    fn from(dto: IndexStatsDto) -> Self {
        Self {
            total_indexed: dto.total_indexed,
            in_stock: dto.in_stock,
            low_stock: dto.low_stock,
            out_of_stock: dto.out_of_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_label_is_kept_verbatim_even_when_it_disagrees() {
        // A stale index entry: the catalog says 0 but the label says LOW.
        let hit = SearchResult {
            id: "3".into(),
            name: "Desk Lamp".into(),
            price: 35.0,
            stock: 0,
            label: "LOW".into(),
        };
        assert_eq!(hit.server_level(), Some(StockLevel::Low));
        assert_eq!(hit.local_level(), StockLevel::OutOfStock);
    }

    #[test]
    fn unrecognized_labels_parse_to_none() {
        let hit = SearchResult {
            id: "3".into(),
            name: "Desk Lamp".into(),
            price: 35.0,
            stock: 2,
            label: "BACKORDERED".into(),
        };
        assert_eq!(hit.server_level(), None);
    }
}
