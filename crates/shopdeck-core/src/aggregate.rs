// ── Pure aggregate derivations ──
//
// No I/O, no panics. Absent inputs (a sibling resource failed to load)
// degrade to zero-valued tallies — a partial dashboard still renders.

use std::time::Duration;

use crate::model::{IndexStats, Order, OrderStatus, Product, StockLevel};

/// Order counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderTally {
    pub total: usize,
    pub pending: usize,
    pub notified: usize,
    /// Statuses the backend added that this client doesn't know.
    pub other: usize,
}

impl OrderTally {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut tally = Self {
            total: orders.len(),
            ..Self::default()
        };
        for order in orders {
            match order.status {
                OrderStatus::Pending => tally.pending += 1,
                OrderStatus::Notified => tally.notified += 1,
                OrderStatus::Other(_) => tally.other += 1,
            }
        }
        tally
    }
}

/// Product counts by stock level, plus total units on hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockTally {
    pub total: usize,
    pub ok: usize,
    pub low: usize,
    pub out_of_stock: usize,
    pub units: u64,
}

impl StockTally {
    pub fn from_products(products: &[Product]) -> Self {
        let mut tally = Self {
            total: products.len(),
            ..Self::default()
        };
        for product in products {
            match product.stock_level() {
                StockLevel::Ok => tally.ok += 1,
                StockLevel::Low => tally.low += 1,
                StockLevel::OutOfStock => tally.out_of_stock += 1,
            }
            tally.units += u64::from(product.stock);
        }
        tally
    }
}

/// Everything the dashboard header derives from loaded resources.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardSummary {
    pub orders: OrderTally,
    pub stock: StockTally,
    pub index: IndexStats,
}

impl DashboardSummary {
    /// Combine whatever subset of resources has loaded.
    ///
    /// `None` inputs contribute zero-valued tallies; one failed source
    /// never turns the whole dashboard into an error.
    pub fn compute(
        orders: Option<&[Order]>,
        products: Option<&[Product]>,
        stats: Option<&IndexStats>,
    ) -> Self {
        Self {
            orders: orders.map(OrderTally::from_orders).unwrap_or_default(),
            stock: products.map(StockTally::from_products).unwrap_or_default(),
            index: stats.copied().unwrap_or_default(),
        }
    }
}

/// Display-only cache-freshness hint derived from response latency.
///
/// A fast catalog response after a write suggests the gateway answered
/// from its cache. This is a hint for the status line, never ground
/// truth, and feeds no correctness-affecting logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHint {
    LikelyHit,
    LikelyMiss,
}

impl CacheHint {
    /// Responses faster than this read as probable cache hits.
    pub const THRESHOLD: Duration = Duration::from_millis(80);

    pub fn from_latency(latency: Duration) -> Self {
        if latency < Self::THRESHOLD {
            Self::LikelyHit
        } else {
            Self::LikelyMiss
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LikelyHit => "probable cache hit",
            Self::LikelyMiss => "probable cache miss",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, status: &str) -> Order {
        Order {
            id,
            customer_name: format!("customer {id}"),
            total: 10.0,
            status: OrderStatus::from(status.to_owned()),
        }
    }

    fn product(id: i64, stock: u32) -> Product {
        Product {
            id,
            name: format!("product {id}"),
            price: 5.0,
            stock,
        }
    }

    #[test]
    fn order_tally_counts_by_status() {
        let orders = [
            order(1, "PENDING"),
            order(2, "NOTIFIED"),
            order(3, "PENDING"),
            order(4, "SHIPPED"),
        ];
        let tally = OrderTally::from_orders(&orders);
        assert_eq!(tally.total, 4);
        assert_eq!(tally.pending, 2);
        assert_eq!(tally.notified, 1);
        assert_eq!(tally.other, 1);
    }

    #[test]
    fn stock_tally_buckets_match_the_classifier() {
        let products = [product(1, 0), product(2, 5), product(3, 6), product(4, 100)];
        let tally = StockTally::from_products(&products);
        assert_eq!(tally.out_of_stock, 1);
        assert_eq!(tally.low, 1);
        assert_eq!(tally.ok, 2);
        assert_eq!(tally.units, 111);
    }

    #[test]
    fn empty_inputs_produce_zero_tallies() {
        assert_eq!(OrderTally::from_orders(&[]), OrderTally::default());
        assert_eq!(StockTally::from_products(&[]), StockTally::default());
    }

    #[test]
    fn summary_tolerates_any_absent_source() {
        let orders = [order(1, "PENDING"), order(2, "NOTIFIED")];

        // Products failed to load; orders still tally, stock is zeroed.
        let summary = DashboardSummary::compute(Some(&orders), None, None);
        assert_eq!(summary.orders.total, 2);
        assert_eq!(summary.orders.notified, 1);
        assert_eq!(summary.stock, StockTally::default());
        assert_eq!(summary.index, IndexStats::default());

        // Nothing loaded at all — still no panic, all zeros.
        let empty = DashboardSummary::compute(None, None, None);
        assert_eq!(empty, DashboardSummary::default());
    }

    #[test]
    fn cache_hint_is_a_pure_threshold() {
        assert_eq!(
            CacheHint::from_latency(Duration::from_millis(10)),
            CacheHint::LikelyHit
        );
        assert_eq!(
            CacheHint::from_latency(Duration::from_millis(500)),
            CacheHint::LikelyMiss
        );
    }
}
