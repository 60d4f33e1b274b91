// ── Product domain type ──

use serde::{Deserialize, Serialize};

use shopdeck_api::StockLevel;
use shopdeck_api::types::ProductDto;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Non-negative decimal price.
    pub price: f64,
    /// Non-negative stock count; the stock badge is derived from this.
    pub stock: u32,
}

impl Product {
    /// Stock classification derived from the raw count.
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.stock)
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            price: dto.price,
            stock: dto.stock,
        }
    }
}
