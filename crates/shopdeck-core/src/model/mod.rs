// ── Domain model ──
//
// Canonical types consumed by UI code. Wire DTOs from `shopdeck-api`
// convert into these via `From`.

pub mod order;
pub mod product;
pub mod search;

pub use order::{Order, OrderStatus};
pub use product::Product;
pub use search::{IndexStats, SearchResult};

// The stock classifier is shared with the query composer in the api
// crate; re-export so consumers have a single import path.
pub use shopdeck_api::StockLevel;
