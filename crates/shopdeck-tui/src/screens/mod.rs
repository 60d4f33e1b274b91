//! Screen implementations. Each screen is a top-level Component.

mod catalog;
mod dashboard;
mod orders;
mod search;

pub use catalog::CatalogScreen;
pub use dashboard::DashboardScreen;
pub use orders::OrdersScreen;
pub use search::SearchScreen;

use crate::component::Component;
use crate::screen::ScreenId;

/// Construct every screen, keyed for the app's dispatch map.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Dashboard, Box::new(DashboardScreen::new())),
        (ScreenId::Orders, Box::new(OrdersScreen::new())),
        (ScreenId::Catalog, Box::new(CatalogScreen::new())),
        (ScreenId::Search, Box::new(SearchScreen::new())),
    ]
}
