//! Catalog screen — product listing with client-side name filtering and
//! inline stock editing.
//!
//! Edit mode survives a rejected or failed submission so the value can
//! be corrected; only a successful update exits it. The stock badge is
//! always derived from the raw count via the shared classifier.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use shopdeck_core::{CacheHint, Product, ResourceState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{badges, money};

/// An in-progress stock edit for one product row.
struct StockEdit {
    product_id: i64,
    input: Input,
}

/// Catalog screen state.
pub struct CatalogScreen {
    focused: bool,
    state: ResourceState<Vec<Product>>,
    filter_input: Input,
    filter_active: bool,
    selected: usize,
    edit: Option<StockEdit>,
    saving: bool,
    error: Option<String>,
    /// Latency of the last catalog fetch — display-only cache hint.
    latency: Option<Duration>,
}

impl CatalogScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            state: ResourceState::default(),
            filter_input: Input::default(),
            filter_active: false,
            selected: 0,
            edit: None,
            saving: false,
            error: None,
            latency: None,
        }
    }

    /// Products matching the name filter, case-insensitively.
    fn filtered(&self) -> Vec<&Product> {
        let needle = self.filter_input.value().to_lowercase();
        self.state
            .data
            .as_deref()
            .map(|products| {
                products
                    .iter()
                    .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn begin_edit(&mut self) {
        let Some((product_id, stock)) = self
            .filtered()
            .get(self.selected)
            .map(|p| (p.id, p.stock))
        else {
            return;
        };
        self.edit = Some(StockEdit {
            product_id,
            input: Input::new(stock.to_string()),
        });
        self.error = None;
    }

    fn submit_edit(&mut self) -> Option<Action> {
        if self.saving {
            return None;
        }
        let edit = self.edit.as_ref()?;
        self.saving = true;
        Some(Action::UpdateStock {
            product_id: edit.product_id,
            raw: edit.input.value().to_owned(),
        })
    }

    fn status_line(&self) -> Line<'_> {
        if let Some(message) = &self.error {
            return Line::from(Span::styled(format!(" {message}"), theme::error_style()));
        }
        if let Some(message) = self.state.error() {
            return Line::from(Span::styled(
                format!(" refresh failed: {message} (showing last data)"),
                theme::error_style(),
            ));
        }
        if let Some(latency) = self.latency {
            // Heuristic only: a fast fetch suggests the gateway's cache
            // answered. Never treated as ground truth.
            let hint = CacheHint::from_latency(latency);
            return Line::from(Span::styled(
                format!(
                    " last fetch {} — {}",
                    money::fmt_millis(latency.as_millis()),
                    hint.label()
                ),
                theme::hint_style(),
            ));
        }
        Line::from("")
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let style = if self.filter_active {
            Style::default().fg(theme::ACCENT_CYAN)
        } else {
            theme::hint_style()
        };
        let cursor = if self.filter_active { "█" } else { "" };
        let line = Line::from(vec![
            Span::styled(" filter: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(format!("{}{cursor}", self.filter_input.value()), style),
            Span::styled(
                "   / filter · ↑↓ select · e edit stock · r refresh",
                theme::hint_style(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Catalog ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.edit.is_some() {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let products = self.filtered();
        if products.is_empty() {
            let message = if self.state.data.is_none() {
                "loading catalog…"
            } else if self.filter_input.value().is_empty() {
                "No products in the catalog."
            } else {
                "No products match the filter."
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(message, theme::hint_style()))),
                inner,
            );
            return;
        }

        let mut rows: Vec<Row> = Vec::with_capacity(products.len());
        for (idx, product) in products.iter().enumerate() {
            let stock_cell = match self
                .edit
                .as_ref()
                .filter(|e| e.product_id == product.id)
            {
                Some(edit) => Cell::from(Span::styled(
                    format!("[{}█]", edit.input.value()),
                    Style::default().fg(theme::ACCENT_CYAN),
                )),
                None => Cell::from(product.stock.to_string()),
            };

            let row = Row::new(vec![
                Cell::from(product.id.to_string()),
                Cell::from(product.name.clone()),
                Cell::from(money::fmt_money(product.price)),
                stock_cell,
                Cell::from(badges::stock_badge(product.stock_level())),
            ]);
            rows.push(if idx == self.selected {
                row.style(theme::row_selected())
            } else {
                row
            });
        }

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(8),
            ],
        )
        .header(
            Row::new(vec!["ID", "Product", "Price", "Stock", "Status"])
                .style(theme::table_header()),
        );
        frame.render_widget(table, inner);
    }
}

impl Component for CatalogScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(edit) = self.edit.as_mut() {
            return Ok(match key.code {
                KeyCode::Esc => {
                    self.edit = None;
                    self.error = None;
                    None
                }
                KeyCode::Enter => self.submit_edit(),
                _ => {
                    edit.input.handle_event(&crossterm::event::Event::Key(key));
                    None
                }
            });
        }

        if self.filter_active {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.filter_active = false;
                    None
                }
                _ => {
                    self.filter_input
                        .handle_event(&crossterm::event::Event::Key(key));
                    self.selected = 0;
                    None
                }
            });
        }

        match key.code {
            KeyCode::Char('/') => {
                self.filter_active = true;
                Ok(None)
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Down => {
                self.selected = self.selected.saturating_add(1);
                self.clamp_selection();
                Ok(None)
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                self.begin_edit();
                Ok(None)
            }
            KeyCode::Char('r') => Ok(Some(Action::RefreshProducts)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ProductsUpdated(state) => {
                self.state = state.clone();
                self.clamp_selection();
            }
            Action::StockUpdated(_) => {
                // Success exits edit mode; the listing refresh arrives
                // through the store.
                self.saving = false;
                self.edit = None;
                self.error = None;
            }
            Action::StockUpdateFailed(message) => {
                // Stay in edit mode so the value can be corrected.
                self.saving = false;
                self.error = Some(message.clone());
            }
            Action::CatalogLatency(elapsed) => self.latency = Some(*elapsed),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
        self.render_filter_bar(frame, rows[0]);
        self.render_table(frame, rows[1]);
        frame.render_widget(Paragraph::new(self.status_line()), rows[2]);
    }

    fn capturing_input(&self) -> bool {
        self.filter_active || self.edit.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "catalog"
    }
}
