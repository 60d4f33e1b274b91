//! Status badges — colored spans for stock levels, order statuses, and
//! per-service load state.

use ratatui::style::Style;
use ratatui::text::Span;

use shopdeck_core::{LoadPhase, OrderStatus, StockLevel};

use crate::theme;

/// Badge for a stock level derived via the local classifier.
pub fn stock_badge(level: StockLevel) -> Span<'static> {
    let (text, color) = match level {
        StockLevel::Ok => ("OK", theme::SUCCESS_GREEN),
        StockLevel::Low => ("LOW", theme::WARN_YELLOW),
        StockLevel::OutOfStock => ("OUT", theme::ERROR_RED),
    };
    Span::styled(text, Style::default().fg(color))
}

/// Badge for a search hit's server-supplied label.
///
/// The label is displayed verbatim; color is applied only when it names
/// a level this client knows.
pub fn search_label_badge(label: &str) -> Span<'static> {
    match label.parse::<StockLevel>() {
        Ok(level) => stock_badge(level),
        Err(_) => Span::styled(label.to_owned(), Style::default().fg(theme::DIM_WHITE)),
    }
}

/// Badge for an order's backend-driven status.
pub fn order_status_badge(status: &OrderStatus) -> Span<'static> {
    let color = match status {
        OrderStatus::Notified => theme::SUCCESS_GREEN,
        OrderStatus::Pending => theme::WARN_YELLOW,
        OrderStatus::Other(_) => theme::DIM_WHITE,
    };
    Span::styled(status.to_string(), Style::default().fg(color))
}

/// Service status dot derived from a resource's load phase:
/// ● online, ○ offline, ◐ checking.
pub fn service_dot(phase: &LoadPhase) -> Span<'static> {
    let (symbol, color) = match phase {
        LoadPhase::Loaded => ("●", theme::SUCCESS_GREEN),
        LoadPhase::Failed(_) => ("○", theme::ERROR_RED),
        LoadPhase::Loading => ("◐", theme::WARN_YELLOW),
    };
    Span::styled(symbol, Style::default().fg(color))
}

/// Plain-text service status, for the dashboard's health panel.
pub fn service_text(phase: &LoadPhase) -> &'static str {
    match phase {
        LoadPhase::Loaded => "online",
        LoadPhase::Failed(_) => "offline",
        LoadPhase::Loading => "checking",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_search_labels_render_verbatim() {
        let span = search_label_badge("BACKORDERED");
        assert_eq!(span.content, "BACKORDERED");
    }

    #[test]
    fn known_search_labels_share_the_stock_badge() {
        assert_eq!(search_label_badge("LOW").content, "LOW");
        assert_eq!(search_label_badge("OUT_OF_STOCK").content, "OUT");
    }

    #[test]
    fn service_text_covers_every_phase() {
        assert_eq!(service_text(&LoadPhase::Loaded), "online");
        assert_eq!(service_text(&LoadPhase::Failed("x".into())), "offline");
        assert_eq!(service_text(&LoadPhase::Loading), "checking");
    }
}
