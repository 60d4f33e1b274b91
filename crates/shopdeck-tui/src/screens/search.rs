//! Search screen — full-text product search with filters, index stats,
//! and the re-index trigger.
//!
//! The status column shows the index's verbatim label, not a locally
//! recomputed one — the index may lag the catalog, and pretending
//! otherwise would hide exactly the staleness this screen exists to
//! reveal. Syncing always refreshes both the stats and the current
//! results, even when no query is set.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use shopdeck_core::{
    IndexStats, ResourceState, SearchQuery, SearchResult, StockLevel, SyncReport,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{badges, money};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryField {
    Text,
    MaxPrice,
}

/// Search screen state.
pub struct SearchScreen {
    focused: bool,
    results: ResourceState<Vec<SearchResult>>,
    stats: ResourceState<IndexStats>,
    query_input: Input,
    price_input: Input,
    input_active: bool,
    active_field: QueryField,
    status_filter: Option<StockLevel>,
    syncing: bool,
    last_sync: Option<SyncReport>,
    error: Option<String>,
    throbber: ThrobberState,
}

impl SearchScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            results: ResourceState::default(),
            stats: ResourceState::default(),
            query_input: Input::default(),
            price_input: Input::default(),
            input_active: false,
            active_field: QueryField::Text,
            status_filter: None,
            syncing: false,
            last_sync: None,
            error: None,
            throbber: ThrobberState::default(),
        }
    }

    /// Compose the query from the current form. Blank text and an empty
    /// price field are simply absent criteria.
    fn compose_query(&self) -> SearchQuery {
        SearchQuery {
            text: self.query_input.value().to_owned(),
            status: self.status_filter,
            max_price: self.price_input.value().trim().parse().ok(),
        }
    }

    fn submit(&mut self) -> Option<Action> {
        self.input_active = false;
        Some(Action::SubmitSearch(self.compose_query()))
    }

    fn cycle_status_filter(&mut self) {
        self.status_filter = match self.status_filter {
            None => Some(StockLevel::Ok),
            Some(StockLevel::Ok) => Some(StockLevel::Low),
            Some(StockLevel::Low) => Some(StockLevel::OutOfStock),
            Some(StockLevel::OutOfStock) => None,
        };
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let border = if self.input_active {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(" Product search ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let field = |label: &'static str, input: &Input, field: QueryField| {
            let active = self.input_active && self.active_field == field;
            let cursor = if active { "█" } else { "" };
            let style = if active {
                Style::default().fg(theme::ACCENT_CYAN)
            } else {
                Style::default().fg(theme::DIM_WHITE)
            };
            vec![
                Span::styled(label, theme::hint_style()),
                Span::styled(format!("{}{cursor}", input.value()), style),
            ]
        };

        let status_label = self
            .status_filter
            .map_or("all", |level| match level {
                StockLevel::Ok => "OK",
                StockLevel::Low => "LOW",
                StockLevel::OutOfStock => "OUT_OF_STOCK",
            });

        let mut query_line = field(" query: ", &self.query_input, QueryField::Text);
        let mut filter_line = field(" max price: ", &self.price_input, QueryField::MaxPrice);
        filter_line.push(Span::styled("   status: ", theme::hint_style()));
        filter_line.push(Span::styled(
            status_label,
            Style::default().fg(theme::ACCENT_PURPLE),
        ));
        query_line.push(Span::styled(
            "    / edit · f status · Enter search · s sync",
            theme::hint_style(),
        ));

        frame.render_widget(
            Paragraph::new(vec![Line::from(query_line), Line::from(filter_line)]),
            inner,
        );
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Results ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.results.is_loading() && self.results.data.is_none() {
            let throbber = Throbber::default()
                .label("searching…")
                .throbber_style(Style::default().fg(theme::WARN_YELLOW));
            let mut spinner = self.throbber.clone();
            frame.render_stateful_widget(throbber, inner, &mut spinner);
            return;
        }

        let Some(results) = self.results.data.as_ref() else {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "Type a query and press Enter, or press s to sync the index.",
                    theme::hint_style(),
                ))),
                inner,
            );
            return;
        };

        if results.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "No results for the current query.",
                    theme::hint_style(),
                ))),
                inner,
            );
            return;
        }

        let rows: Vec<Row> = results
            .iter()
            .map(|hit| {
                Row::new(vec![
                    Cell::from(hit.id.clone()),
                    Cell::from(hit.name.clone()),
                    Cell::from(money::fmt_money(hit.price)),
                    Cell::from(hit.stock.to_string()),
                    // The index's own label, verbatim.
                    Cell::from(badges::search_label_badge(&hit.label)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Length(14),
            ],
        )
        .header(
            Row::new(vec!["ID", "Product", "Price", "Stock", "Status"])
                .style(theme::table_header()),
        );
        frame.render_widget(table, inner);
    }

    fn render_index_panel(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Search index ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let stat_row = |label: &'static str, value: String, style: Style| {
            Line::from(vec![
                Span::styled(format!("  {label:<14}"), Style::default().fg(theme::DIM_WHITE)),
                Span::styled(value, style),
            ])
        };

        let mut lines = vec![Line::from("")];
        match self.stats.data.as_deref() {
            Some(stats) => {
                lines.push(stat_row(
                    "Indexed",
                    stats.total_indexed.to_string(),
                    Style::default().fg(theme::ACCENT_CYAN),
                ));
                lines.push(stat_row(
                    "In stock",
                    stats.in_stock.to_string(),
                    Style::default().fg(theme::SUCCESS_GREEN),
                ));
                lines.push(stat_row(
                    "Low stock",
                    stats.low_stock.to_string(),
                    Style::default().fg(theme::WARN_YELLOW),
                ));
                lines.push(stat_row(
                    "Out of stock",
                    stats.out_of_stock.to_string(),
                    Style::default().fg(theme::ERROR_RED),
                ));
            }
            None => {
                let message = self
                    .stats
                    .error()
                    .map_or("stats not loaded yet", |_| "stats unavailable");
                lines.push(Line::from(Span::styled(
                    format!("  {message}"),
                    theme::hint_style(),
                )));
            }
        }

        lines.push(Line::from(""));
        if self.syncing {
            lines.push(Line::from(Span::styled(
                "  syncing index…",
                Style::default().fg(theme::WARN_YELLOW),
            )));
        } else if let Some(report) = self.last_sync {
            lines.push(Line::from(Span::styled(
                format!(
                    "  synced {} products in {}",
                    report.products_indexed,
                    money::fmt_millis(report.elapsed.as_millis())
                ),
                Style::default().fg(theme::SUCCESS_GREEN),
            )));
        }
        if let Some(message) = self.error.as_deref().or_else(|| self.results.error()) {
            lines.push(Line::from(Span::styled(
                format!("  {message}"),
                theme::error_style(),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for SearchScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.input_active {
            return Ok(match key.code {
                KeyCode::Esc => {
                    self.input_active = false;
                    None
                }
                KeyCode::Tab => {
                    self.active_field = match self.active_field {
                        QueryField::Text => QueryField::MaxPrice,
                        QueryField::MaxPrice => QueryField::Text,
                    };
                    None
                }
                KeyCode::Enter => self.submit(),
                _ => {
                    let event = crossterm::event::Event::Key(key);
                    match self.active_field {
                        QueryField::Text => self.query_input.handle_event(&event),
                        QueryField::MaxPrice => self.price_input.handle_event(&event),
                    };
                    None
                }
            });
        }

        match key.code {
            KeyCode::Char('/') | KeyCode::Char('i') => {
                self.input_active = true;
                self.active_field = QueryField::Text;
                Ok(None)
            }
            KeyCode::Char('f') => {
                self.cycle_status_filter();
                Ok(None)
            }
            KeyCode::Enter => Ok(self.submit()),
            KeyCode::Char('s') => {
                if self.syncing {
                    Ok(None)
                } else {
                    self.syncing = true;
                    self.error = None;
                    Ok(Some(Action::TriggerSync))
                }
            }
            KeyCode::Char('r') => Ok(Some(Action::RefreshSearch)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.throbber.calc_next(),
            Action::SearchUpdated(state) => self.results = state.clone(),
            Action::StatsUpdated(state) => self.stats = state.clone(),
            Action::SyncCompleted(report) => {
                self.syncing = false;
                self.last_sync = Some(*report);
                self.error = None;
            }
            Action::SyncFailed(message) => {
                self.syncing = false;
                self.error = Some(message.clone());
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).split(area);
        self.render_form(frame, rows[0]);

        let cols =
            Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)])
                .split(rows[1]);
        self.render_results(frame, cols[0]);
        self.render_index_panel(frame, cols[1]);
    }

    fn capturing_input(&self) -> bool {
        self.input_active
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "search"
    }
}
