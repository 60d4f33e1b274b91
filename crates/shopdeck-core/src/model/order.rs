// ── Order domain type ──

use std::fmt;

use serde::{Deserialize, Serialize};

use shopdeck_api::types::OrderDto;

/// An order as displayed by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub total: f64,
    pub status: OrderStatus,
}

/// Backend-driven order lifecycle state.
///
/// The async notifier flips `Pending` to `Notified` out-of-band; the
/// client never asserts a transition, only observes it on the next read.
/// Statuses the backend may add later are preserved verbatim rather
/// than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Notified,
    Other(String),
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => Self::Pending,
            "NOTIFIED" => Self::Notified,
            _ => Self::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("PENDING"),
            Self::Notified => f.write_str("NOTIFIED"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        Self {
            id: dto.id,
            customer_name: dto.customer_name,
            total: dto.total,
            status: OrderStatus::from(dto.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse_and_round_trip() {
        assert_eq!(OrderStatus::from("PENDING".to_owned()), OrderStatus::Pending);
        assert_eq!(
            OrderStatus::from("NOTIFIED".to_owned()),
            OrderStatus::Notified
        );
        assert_eq!(OrderStatus::Notified.to_string(), "NOTIFIED");
    }

    #[test]
    fn unknown_statuses_are_preserved_verbatim() {
        let status = OrderStatus::from("SHIPPED".to_owned());
        assert_eq!(status, OrderStatus::Other("SHIPPED".into()));
        assert_eq!(status.to_string(), "SHIPPED");
    }
}
