//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use shopdeck_core::Gateway;

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen — the single view-selector value.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Connection to the API gateway, if one was configured.
    gateway: Option<Gateway>,
    /// Current status-line notification.
    notification: Option<Notification>,
    /// Action sender — components and tasks dispatch through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(gateway: Option<Gateway>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            active_screen: ScreenId::Dashboard,
            screens,
            running: true,
            gateway,
            notification: None,
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        // Background bridge: gateway store changes → actions.
        let bridge_cancel = CancellationToken::new();
        let bridge = self.gateway.clone().map(|gateway| {
            let tx = self.action_tx.clone();
            let cancel = bridge_cancel.clone();
            tokio::spawn(data_bridge::spawn_data_bridge(gateway, tx, cancel))
        });
        if self.gateway.is_none() {
            let _ = self.action_tx.send(Action::Notify(Notification::error(
                "no gateway configured — pass --url or add a profile to the config file",
            )));
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        bridge_cancel.cancel();
        if let Some(handle) = bridge {
            let _ = handle.await;
        }
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // While a screen is capturing text entry, it owns the keyboard.
        let capturing = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.capturing_input());
        if capturing {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                #[allow(clippy::as_conversions)]
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            _ => {}
        }

        // Delegate everything else to the active screen
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Process one action: app-level handling, gateway dispatch, then
    /// fan-out to every screen.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchScreen(id) => self.switch_screen(*id),
            Action::Notify(notification) => self.notification = Some(notification.clone()),
            Action::DismissNotification => self.notification = None,

            // ── Loader triggers ──────────────────────────────────────
            Action::RefreshAll => self.spawn_gateway(|g| async move { g.refresh_all().await }),
            Action::RefreshOrders => {
                self.spawn_gateway(|g| async move { g.refresh_orders().await });
            }
            Action::RefreshProducts => {
                self.spawn_gateway(|g| async move { g.refresh_products().await });
            }
            Action::RefreshSearch => {
                self.spawn_gateway(|g| async move { g.refresh_search().await });
            }
            Action::SubmitSearch(query) => {
                let query = query.clone();
                self.spawn_gateway(move |g| async move { g.search(query).await });
            }

            // ── Mutations ────────────────────────────────────────────
            Action::CreateOrder {
                customer_name,
                total,
            } => self.dispatch_create_order(customer_name.clone(), total),
            Action::UpdateStock { product_id, raw } => {
                self.dispatch_update_stock(*product_id, raw.clone());
            }
            Action::TriggerSync => self.dispatch_sync(),

            _ => {}
        }

        // Fan out to every screen; collect follow-up actions.
        let mut follow_ups = Vec::new();
        for screen in self.screens.values_mut() {
            if let Some(follow) = screen.update(action)? {
                follow_ups.push(follow);
            }
        }
        for follow in follow_ups {
            self.action_tx.send(follow)?;
        }

        Ok(())
    }

    /// Switch the active screen and trigger its loader, mirroring the
    /// load-on-mount behavior of each view.
    fn switch_screen(&mut self, id: ScreenId) {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = id;
        if let Some(screen) = self.screens.get_mut(&id) {
            screen.set_focused(true);
        }

        let mount_refresh = match id {
            ScreenId::Dashboard => Some(Action::RefreshAll),
            ScreenId::Orders => Some(Action::RefreshOrders),
            ScreenId::Catalog => Some(Action::RefreshProducts),
            ScreenId::Search => None,
        };
        if let Some(refresh) = mount_refresh {
            let _ = self.action_tx.send(refresh);
        }
    }

    // ── Gateway dispatch ─────────────────────────────────────────────

    fn spawn_gateway<F, Fut>(&self, f: F)
    where
        F: FnOnce(Gateway) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if let Some(gateway) = self.gateway.clone() {
            tokio::spawn(f(gateway));
        }
    }

    fn dispatch_create_order(&self, customer_name: String, total_raw: &str) {
        let Some(gateway) = self.gateway.clone() else {
            let _ = self
                .action_tx
                .send(Action::OrderCreateFailed("no gateway configured".into()));
            return;
        };
        // Empty or unparseable totals fall back to zero; the name is
        // what validation actually gates on.
        let total: f64 = total_raw.trim().parse().unwrap_or(0.0);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match gateway.create_order(&customer_name, total).await {
                Ok(order) => {
                    let _ = tx.send(Action::OrderCreated(order));
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    let _ = tx.send(Action::OrderCreateFailed(e.to_string()));
                }
            }
        });
    }

    fn dispatch_update_stock(&self, product_id: i64, raw: String) {
        let Some(gateway) = self.gateway.clone() else {
            let _ = self
                .action_tx
                .send(Action::StockUpdateFailed("no gateway configured".into()));
            return;
        };
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match gateway.update_stock(product_id, &raw).await {
                Ok(product) => {
                    let _ = tx.send(Action::StockUpdated(product));
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    let _ = tx.send(Action::StockUpdateFailed(e.to_string()));
                }
            }
        });
    }

    fn dispatch_sync(&self) {
        let Some(gateway) = self.gateway.clone() else {
            let _ = self
                .action_tx
                .send(Action::SyncFailed("no gateway configured".into()));
            return;
        };
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match gateway.sync_index().await {
                Ok(report) => {
                    let _ = tx.send(Action::SyncCompleted(report));
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    let _ = tx.send(Action::SyncFailed(e.to_string()));
                }
            }
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let areas = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.render_tab_bar(frame, areas[0]);
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, areas[1]);
        }
        self.render_status_line(frame, areas[2]);
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|s| Line::from(format!(" {}:{} ", s.number(), s.label())))
            .collect();
        let selected = ScreenId::ALL
            .iter()
            .position(|&s| s == self.active_screen)
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(theme::DIM_WHITE))
            .highlight_style(
                Style::default()
                    .fg(theme::ACCENT_CYAN)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("│");
        frame.render_widget(tabs, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let left = match &self.notification {
            Some(notification) => {
                let color = match notification.level {
                    NotificationLevel::Success => theme::SUCCESS_GREEN,
                    NotificationLevel::Error => theme::ERROR_RED,
                    NotificationLevel::Info => theme::DIM_WHITE,
                };
                Span::styled(
                    format!(" {}", notification.message),
                    Style::default().fg(color),
                )
            }
            None => Span::styled(" q quit · 1-4 screens · Tab cycle", theme::hint_style()),
        };

        let right = self.gateway.as_ref().map_or_else(
            || Span::styled("offline ", theme::error_style()),
            |gateway| {
                Span::styled(
                    format!("{} ", gateway.config().url),
                    theme::hint_style(),
                )
            },
        );

        let line = Line::from(vec![left]);
        frame.render_widget(Paragraph::new(line), area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![right]).right_aligned()),
            area,
        );
    }
}
