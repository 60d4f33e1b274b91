//! Orders screen — create form plus the order listing.
//!
//! Submitting with a blank name surfaces a validation error and keeps
//! the form intact; only a successful create clears it. A failed
//! refresh keeps the last listing on screen with the error inline.

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

use shopdeck_core::{Order, ResourceState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{badges, money};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Total,
}

/// Orders screen state.
pub struct OrdersScreen {
    focused: bool,
    state: ResourceState<Vec<Order>>,
    form_active: bool,
    active_field: FormField,
    name_input: Input,
    total_input: Input,
    creating: bool,
    /// Submission error — validation or gateway. Cleared on success.
    error: Option<String>,
    throbber: ThrobberState,
}

impl OrdersScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            state: ResourceState::default(),
            form_active: false,
            active_field: FormField::Name,
            name_input: Input::default(),
            total_input: Input::default(),
            creating: false,
            error: None,
            throbber: ThrobberState::default(),
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if self.creating {
            return None;
        }
        self.creating = true;
        Some(Action::CreateOrder {
            customer_name: self.name_input.value().to_owned(),
            total: self.total_input.value().to_owned(),
        })
    }

    fn field_line(&self, label: &'static str, input: &Input, field: FormField) -> Line<'_> {
        let active = self.form_active && self.active_field == field;
        let marker = if active { "▸ " } else { "  " };
        let value_style = if active {
            Style::default().fg(theme::ACCENT_CYAN)
        } else {
            Style::default().fg(theme::DIM_WHITE)
        };
        let cursor = if active { "█" } else { "" };
        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme::ACCENT_PURPLE)),
            Span::styled(label, Style::default().fg(theme::DIM_WHITE)),
            Span::styled(format!("{}{cursor}", input.value()), value_style),
        ])
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let border = if self.form_active {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(" Create order ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let hint = if self.form_active {
            "Enter submit · Tab next field · Esc close"
        } else {
            "c edit form · r refresh"
        };

        let lines = vec![
            Line::from(""),
            self.field_line("Customer  ", &self.name_input, FormField::Name),
            self.field_line("Total     ", &self.total_input, FormField::Total),
            Line::from(""),
            match (&self.error, self.creating) {
                (_, true) => Line::from(Span::styled(
                    "  creating…",
                    Style::default().fg(theme::WARN_YELLOW),
                )),
                (Some(message), _) => {
                    Line::from(Span::styled(format!("  {message}"), theme::error_style()))
                }
                (None, false) => Line::from(""),
            },
            Line::from(""),
            Line::from(Span::styled(format!("  {hint}"), theme::hint_style())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Orders ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.state.is_loading() && self.state.data.is_none() {
            let throbber = Throbber::default()
                .label("loading orders…")
                .throbber_style(Style::default().fg(theme::WARN_YELLOW));
            let mut spinner = self.throbber.clone();
            frame.render_stateful_widget(throbber, inner, &mut spinner);
            return;
        }

        let Some(orders) = self.state.data.as_ref() else {
            let message = self
                .state
                .error()
                .map_or_else(|| "No orders yet. Press c to create one.".to_owned(), str::to_owned);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(message, theme::hint_style()))),
                inner,
            );
            return;
        };

        let mut rows: Vec<Row> = Vec::with_capacity(orders.len());
        for order in orders.iter() {
            rows.push(Row::new(vec![
                Cell::from(format!("#{}", order.id)),
                Cell::from(order.customer_name.clone()),
                Cell::from(money::fmt_money(order.total)),
                Cell::from(badges::order_status_badge(&order.status)),
            ]));
        }

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Min(16),
                Constraint::Length(12),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(vec!["ID", "Customer", "Total", "Status"]).style(theme::table_header()),
        );

        // A refresh failure keeps the stale table; surface it above.
        if let Some(message) = self.state.error() {
            let parts =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(inner);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("refresh failed: {message} (showing last data)"),
                    theme::error_style(),
                ))),
                parts[0],
            );
            frame.render_widget(table, parts[1]);
        } else {
            frame.render_widget(table, inner);
        }
    }
}

impl Component for OrdersScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form_active {
            return Ok(match key.code {
                KeyCode::Esc => {
                    self.form_active = false;
                    None
                }
                KeyCode::Tab => {
                    self.active_field = match self.active_field {
                        FormField::Name => FormField::Total,
                        FormField::Total => FormField::Name,
                    };
                    None
                }
                KeyCode::Enter => self.submit(),
                _ => {
                    let event = crossterm::event::Event::Key(key);
                    match self.active_field {
                        FormField::Name => self.name_input.handle_event(&event),
                        FormField::Total => self.total_input.handle_event(&event),
                    };
                    None
                }
            });
        }

        match key.code {
            KeyCode::Char('c') => {
                self.form_active = true;
                self.active_field = FormField::Name;
                Ok(None)
            }
            KeyCode::Char('r') => Ok(Some(Action::RefreshOrders)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.throbber.calc_next(),
            Action::OrdersUpdated(state) => self.state = state.clone(),
            Action::OrderCreated(_) => {
                // Success clears the form; the listing refresh arrives
                // through the store.
                self.creating = false;
                self.error = None;
                self.form_active = false;
                self.name_input.reset();
                self.total_input.reset();
            }
            Action::OrderCreateFailed(message) => {
                // No data loss on failure: inputs stay as typed.
                self.creating = false;
                self.error = Some(message.clone());
                self.form_active = true;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let cols =
            Layout::horizontal([Constraint::Percentage(38), Constraint::Percentage(62)])
                .split(area);
        self.render_form(frame, cols[0]);
        self.render_table(frame, cols[1]);
    }

    fn capturing_input(&self) -> bool {
        self.form_active
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "orders"
    }
}
