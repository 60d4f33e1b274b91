//! Dashboard screen — cross-service overview, the home screen.
//!
//! Stat cards up top (order and catalog tallies), service health on the
//! left (derived from each resource's load phase), inventory alerts and
//! index stats on the right.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use shopdeck_core::{DashboardSummary, IndexStats, Order, Product, ResourceState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::badges;

/// Dashboard screen state.
pub struct DashboardScreen {
    focused: bool,
    orders: ResourceState<Vec<Order>>,
    products: ResourceState<Vec<Product>>,
    stats: ResourceState<IndexStats>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            orders: ResourceState::default(),
            products: ResourceState::default(),
            stats: ResourceState::default(),
        }
    }

    fn summary(&self) -> DashboardSummary {
        DashboardSummary::compute(
            self.orders.data.as_deref().map(Vec::as_slice),
            self.products.data.as_deref().map(Vec::as_slice),
            self.stats.data.as_deref(),
        )
    }

    fn render_card(frame: &mut Frame, area: Rect, title: &str, value: String, accent: Style) {
        let block = Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(value, accent.add_modifier(Modifier::BOLD))).centered(),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_stat_cards(&self, frame: &mut Frame, area: Rect) {
        let summary = self.summary();
        let cards = Layout::horizontal([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

        Self::render_card(
            frame,
            cards[0],
            "Orders",
            summary.orders.total.to_string(),
            Style::default().fg(theme::ACCENT_CYAN),
        );
        Self::render_card(
            frame,
            cards[1],
            "Notified",
            summary.orders.notified.to_string(),
            Style::default().fg(theme::SUCCESS_GREEN),
        );
        Self::render_card(
            frame,
            cards[2],
            "Pending",
            summary.orders.pending.to_string(),
            Style::default().fg(theme::WARN_YELLOW),
        );
        Self::render_card(
            frame,
            cards[3],
            "Products",
            summary.stock.total.to_string(),
            Style::default().fg(theme::ACCENT_PURPLE),
        );
    }

    /// Service health — one line per backend, derived purely from the
    /// corresponding resource's load phase.
    fn render_services(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Services ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let row = |name: &'static str, state_phase, detail: String| {
            Line::from(vec![
                Span::raw("  "),
                badges::service_dot(state_phase),
                Span::raw(" "),
                Span::styled(name, Style::default().fg(theme::DIM_WHITE)),
                Span::raw("  "),
                Span::styled(
                    badges::service_text(state_phase),
                    Style::default().fg(theme::MUTED),
                ),
                Span::raw("  "),
                Span::styled(detail, theme::hint_style()),
            ])
        };

        let orders_detail = self
            .orders
            .data
            .as_ref()
            .map(|o| format!("{} records", o.len()))
            .unwrap_or_default();
        let products_detail = self
            .products
            .data
            .as_ref()
            .map(|p| format!("{} records", p.len()))
            .unwrap_or_default();
        let stats_detail = self
            .stats
            .data
            .as_ref()
            .map(|s| format!("{} indexed", s.total_indexed))
            .unwrap_or_default();

        let lines = vec![
            Line::from(""),
            row("Order Service   ", &self.orders.phase, orders_detail),
            row("Catalog Service ", &self.products.phase, products_detail),
            row("Search Index    ", &self.stats.phase, stats_detail),
            Line::from(""),
            match self.first_error() {
                Some(message) => Line::from(Span::styled(
                    format!("  {message}"),
                    theme::error_style(),
                )),
                None => Line::from(""),
            },
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn first_error(&self) -> Option<&str> {
        self.orders
            .error()
            .or_else(|| self.products.error())
            .or_else(|| self.stats.error())
    }

    fn render_inventory(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Inventory ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let summary = self.summary();
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  In stock      ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    summary.stock.ok.to_string(),
                    Style::default().fg(theme::SUCCESS_GREEN),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Low stock     ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    summary.stock.low.to_string(),
                    Style::default().fg(theme::WARN_YELLOW),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Out of stock  ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    summary.stock.out_of_stock.to_string(),
                    Style::default().fg(theme::ERROR_RED),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Units on hand ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    summary.stock.units.to_string(),
                    Style::default().fg(theme::ACCENT_CYAN),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Index         ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    format!(
                        "{} indexed / {} in stock / {} low / {} out",
                        summary.index.total_indexed,
                        summary.index.in_stock,
                        summary.index.low_stock,
                        summary.index.out_of_stock
                    ),
                    theme::hint_style(),
                ),
            ]),
        ];

        // Alerts only when there is something to alert on.
        if summary.stock.low > 0 || summary.stock.out_of_stock > 0 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(
                    "  ⚠ {} low-stock, {} out-of-stock product(s)",
                    summary.stock.low, summary.stock.out_of_stock
                ),
                Style::default().fg(theme::WARN_YELLOW),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('r') => Ok(Some(Action::RefreshAll)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::OrdersUpdated(state) => self.orders = state.clone(),
            Action::ProductsUpdated(state) => self.products = state.clone(),
            Action::StatsUpdated(state) => self.stats = state.clone(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).split(area);
        self.render_stat_cards(frame, rows[0]);

        let cols =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1]);
        self.render_services(frame, cols[0]);
        self.render_inventory(frame, cols[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "dashboard"
    }
}
