use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget as RatatuiWidget},
};
use std::{io, time::Duration};
use tracing_subscriber::EnvFilter;

use crossbeam::channel::Receiver;
use lifeos_core::{
    AppConfig, ConfirmationGate, DashboardStore, EventBus, FileStorage, GridSpan, NewComponent,
    StoreEvent, Subscription, WidgetContainer, WidgetRegistry, grid_areas,
};

const SIDEBAR_WIDTH: u16 = 24;
const GRID_ROW_HEIGHT: u16 = 6;

/// Deferred store mutation parked behind the confirmation gate.
enum PendingAction {
    RemoveSection(String),
    RemoveComponent(String, String),
    Reset,
}

enum Mode {
    Normal,
    /// Widget-type picker for adding a component to the active section.
    AddComponent { selected: usize },
    /// Inline `key=value` editor targeting the focused component's config.
    EditConfig { buffer: String },
}

struct App {
    store: DashboardStore,
    registry: WidgetRegistry,
    gate: ConfirmationGate<PendingAction>,
    views: Vec<WidgetContainer>,
    focused: usize,
    mode: Mode,
    events: Receiver<StoreEvent>,
    _subscription: Subscription,
}

impl App {
    fn new(store: DashboardStore, registry: WidgetRegistry) -> Self {
        let (subscription, events) = store.bus().subscribe("*");
        let mut app = Self {
            store,
            registry,
            gate: ConfirmationGate::new(),
            views: Vec::new(),
            focused: 0,
            mode: Mode::Normal,
            events,
            _subscription: subscription,
        };
        app.rebuild_views();
        app
    }

    fn active_section_id(&self) -> Option<String> {
        self.store
            .active_section()
            .or_else(|| self.store.sections().first())
            .map(|s| s.id.clone())
    }

    /// Tear down the current views and build fresh ones for the active
    /// section's component list.
    fn rebuild_views(&mut self) {
        for view in self.views.iter_mut() {
            view.unmount();
        }
        self.views.clear();

        if let Some(section_id) = self.active_section_id()
            && let Some(section) = self.store.section(&section_id)
        {
            for component in &section.components {
                let widget = self.registry.create(&component.kind, &component.config);
                let mut view = WidgetContainer::new(component.id.clone(), widget);
                view.mount();
                self.views.push(view);
            }
        }

        if self.focused >= self.views.len() {
            self.focused = self.views.len().saturating_sub(1);
        }
    }

    /// Drain store events published since the last pass. Config changes are
    /// pushed into the matching view in place; structural changes rebuild.
    fn drain_events(&mut self) {
        let mut rebuild = false;
        while let Ok(event) = self.events.try_recv() {
            match event {
                StoreEvent::ConfigUpdated {
                    section_id,
                    component_id,
                } => {
                    let config = self
                        .store
                        .section(&section_id)
                        .and_then(|s| s.component(&component_id))
                        .map(|c| c.config.clone());
                    if let Some(config) = config
                        && let Some(view) = self
                            .views
                            .iter_mut()
                            .find(|v| v.component_id() == component_id)
                    {
                        view.config_updated(&config);
                    }
                }
                StoreEvent::ComponentAdded { .. }
                | StoreEvent::ComponentRemoved { .. }
                | StoreEvent::ComponentsReordered { .. }
                | StoreEvent::ComponentResized { .. }
                | StoreEvent::SectionRemoved { .. }
                | StoreEvent::SnapshotReset => rebuild = true,
                _ => {}
            }
        }
        if rebuild {
            self.rebuild_views();
        }
    }

    fn apply(&mut self, action: PendingAction) {
        let result = match action {
            PendingAction::RemoveSection(id) => self.store.remove_section(&id).err(),
            PendingAction::RemoveComponent(section_id, component_id) => self
                .store
                .remove_component(&section_id, &component_id)
                .err(),
            PendingAction::Reset => {
                self.store.reset_to_default();
                None
            }
        };
        if let Some(err) = result {
            tracing::warn!(error = %err, "confirmed action no longer applies");
        }
    }

    fn cycle_section(&mut self, forward: bool) {
        let sections = self.store.sections();
        if sections.is_empty() {
            return;
        }
        let current = self
            .active_section_id()
            .and_then(|id| sections.iter().position(|s| s.id == id))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % sections.len()
        } else {
            (current + sections.len() - 1) % sections.len()
        };
        let id = sections[next].id.clone();
        self.store.set_active_section(Some(id));
        self.focused = 0;
        self.rebuild_views();
    }

    fn focused_component_id(&self) -> Option<String> {
        self.views
            .get(self.focused)
            .map(|v| v.component_id().to_string())
    }

    fn cycle_focused_size(&mut self) {
        let Some(section_id) = self.active_section_id() else {
            return;
        };
        let Some(component_id) = self.focused_component_id() else {
            return;
        };
        let current = self
            .store
            .section(&section_id)
            .and_then(|s| s.component(&component_id))
            .map(|c| (c.w, c.h));
        let Some(current) = current else { return };
        let next = match current {
            (GridSpan::One, GridSpan::One) => (GridSpan::Two, GridSpan::One),
            (GridSpan::Two, GridSpan::One) => (GridSpan::One, GridSpan::Two),
            (GridSpan::One, GridSpan::Two) => (GridSpan::Two, GridSpan::Two),
            (GridSpan::Two, GridSpan::Two) => (GridSpan::One, GridSpan::One),
        };
        if let Err(err) =
            self.store
                .update_component_size(&section_id, &component_id, next.0, next.1)
        {
            tracing::warn!(error = %err, "resize failed");
        }
    }

    fn move_focused(&mut self, delta: isize) {
        let Some(section_id) = self.active_section_id() else {
            return;
        };
        if self.views.is_empty() {
            return;
        }
        let old = self.focused;
        let new = old.saturating_add_signed(delta);
        if let Err(err) = self.store.reorder_components(&section_id, old, new) {
            tracing::warn!(error = %err, "reorder failed");
            return;
        }
        self.focused = new.min(self.views.len() - 1);
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // The confirmation gate owns the keyboard while a prompt is up.
        if self.gate.is_pending() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    if let Some(action) = self.gate.confirm() {
                        self.apply(action);
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => self.gate.dismiss(),
                _ => {}
            }
            return false;
        }

        match &mut self.mode {
            Mode::AddComponent { selected } => {
                let names = self.registry.names();
                match key.code {
                    KeyCode::Up => *selected = selected.saturating_sub(1),
                    KeyCode::Down => {
                        if *selected + 1 < names.len() {
                            *selected += 1;
                        }
                    }
                    KeyCode::Enter => {
                        let kind = names.get(*selected).cloned();
                        self.mode = Mode::Normal;
                        if let (Some(kind), Some(section_id)) = (kind, self.active_section_id()) {
                            let new = NewComponent::for_type(&self.registry, &kind);
                            if let Err(err) = self.store.add_component(&section_id, new) {
                                tracing::warn!(error = %err, "add component failed");
                            }
                        }
                    }
                    KeyCode::Esc => self.mode = Mode::Normal,
                    _ => {}
                }
                return false;
            }
            Mode::EditConfig { buffer } => {
                match key.code {
                    KeyCode::Char(c) => buffer.push(c),
                    KeyCode::Backspace => {
                        buffer.pop();
                    }
                    KeyCode::Enter => {
                        let input = buffer.clone();
                        self.mode = Mode::Normal;
                        self.apply_config_edit(&input);
                    }
                    KeyCode::Esc => self.mode = Mode::Normal,
                    _ => {}
                }
                return false;
            }
            Mode::Normal => {}
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.cycle_section(true),
            KeyCode::BackTab => self.cycle_section(false),
            KeyCode::Up => self.focused = self.focused.saturating_sub(1),
            KeyCode::Down => {
                if self.focused + 1 < self.views.len() {
                    self.focused += 1;
                }
            }
            KeyCode::Char('[') => self.move_focused(-1),
            KeyCode::Char(']') => self.move_focused(1),
            KeyCode::Char('s') => self.cycle_focused_size(),
            KeyCode::Char('a') => {
                if let Err(err) = self.store.add_section("New Section", "Folder") {
                    tracing::warn!(error = %err, "add section failed");
                }
            }
            KeyCode::Char('c') => {
                if !self.registry.names().is_empty() {
                    self.mode = Mode::AddComponent { selected: 0 };
                }
            }
            KeyCode::Char('e') => {
                if self.focused_component_id().is_some() {
                    self.mode = Mode::EditConfig {
                        buffer: String::new(),
                    };
                }
            }
            KeyCode::Char('d') => {
                if let (Some(section_id), Some(component_id)) =
                    (self.active_section_id(), self.focused_component_id())
                {
                    self.gate.request(
                        "Remove Component",
                        "Remove this component from the section?",
                        PendingAction::RemoveComponent(section_id, component_id),
                    );
                }
            }
            KeyCode::Char('D') => {
                if let Some(section) = self.store.active_section() {
                    self.gate.request(
                        "Delete Section",
                        format!(
                            "Delete '{}' and everything in it? This cannot be undone.",
                            section.title
                        ),
                        PendingAction::RemoveSection(section.id.clone()),
                    );
                }
            }
            KeyCode::Char('r') => {
                self.gate.request(
                    "Reset Dashboard",
                    "Discard all sections and restore the default layout?",
                    PendingAction::Reset,
                );
            }
            _ => {
                let event = lifeos_core::Event::Key(key);
                if let Some(focused) = self.views.get_mut(self.focused) {
                    focused.handle_event(event);
                }
            }
        }
        false
    }

    /// Parse `key=value` and merge it into the focused component's config.
    /// Values that parse as numbers are stored as numbers.
    fn apply_config_edit(&mut self, input: &str) {
        let Some((key, value)) = input.split_once('=') else {
            return;
        };
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        let value = value.trim();
        let json_value = match value.parse::<f64>() {
            Ok(number) => serde_json::json!(number),
            Err(_) => serde_json::json!(value),
        };
        if let (Some(section_id), Some(component_id)) =
            (self.active_section_id(), self.focused_component_id())
        {
            let partial = serde_json::json!({ key: json_value });
            if let Err(err) =
                self.store
                    .update_component_config(&section_id, &component_id, &partial)
            {
                tracing::warn!(error = %err, "config edit failed");
            }
        }
    }

    fn draw(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        self.draw_sidebar(chunks[0], buf);
        self.draw_grid(chunks[1], buf);

        match &self.mode {
            Mode::AddComponent { selected } => self.draw_picker(area, buf, *selected),
            Mode::EditConfig { buffer } => {
                let buffer = buffer.clone();
                draw_editor(area, buf, &buffer);
            }
            Mode::Normal => {}
        }

        if let Some(pending) = self.gate.pending() {
            draw_confirmation(area, buf, &pending.title, &pending.message, pending.is_alert);
        }
    }

    fn draw_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let active_id = self.active_section_id();
        let items: Vec<ListItem> = self
            .store
            .sections()
            .iter()
            .map(|section| {
                let style = if Some(&section.id) == active_id.as_ref() {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(Span::styled(section.title.clone(), style)))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Sections [Tab] "),
            )
            .render(area, buf);
    }

    fn draw_grid(&mut self, area: Rect, buf: &mut Buffer) {
        let Some(section_id) = self.active_section_id() else {
            Paragraph::new("No sections. Press 'a' to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        };
        let cells: Vec<(GridSpan, GridSpan)> = self
            .store
            .section(&section_id)
            .map(|s| s.components.iter().map(|c| (c.w, c.h)).collect())
            .unwrap_or_default();
        let titles: Vec<String> = self
            .store
            .section(&section_id)
            .map(|s| s.components.iter().map(|c| c.title.clone()).collect())
            .unwrap_or_default();

        let areas = grid_areas(area, &cells, GRID_ROW_HEIGHT);
        for (index, (view, cell_area)) in self.views.iter_mut().zip(areas).enumerate() {
            let focused = index == self.focused;
            let border_color = if focused { Color::Cyan } else { Color::DarkGray };
            let title = titles.get(index).cloned().unwrap_or_default();
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} "))
                .border_style(Style::default().fg(border_color));
            let inner = block.inner(cell_area);
            block.render(cell_area, buf);
            view.render_focused(inner, buf, focused);
        }
    }

    fn draw_picker(&self, area: Rect, buf: &mut Buffer, selected: usize) {
        let names = self.registry.names();
        let popup = centered_rect(area, 40, (names.len() as u16 + 2).max(4));
        Clear.render(popup, buf);
        let items: Vec<ListItem> = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let style = if index == selected {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(Span::styled(name.clone(), style)))
            })
            .collect();
        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Add Component "),
            )
            .render(popup, buf);
    }
}

fn draw_editor(area: Rect, buf: &mut Buffer, buffer: &str) {
    let popup = centered_rect(area, 50, 3);
    Clear.render(popup, buf);
    Paragraph::new(format!("{buffer}_"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Edit Config (key=value) "),
        )
        .render(popup, buf);
}

fn draw_confirmation(area: Rect, buf: &mut Buffer, title: &str, message: &str, is_alert: bool) {
    let popup = centered_rect(area, 50, 5);
    Clear.render(popup, buf);
    let hint = if is_alert {
        "[Enter] OK"
    } else {
        "[y/Enter] Confirm   [n/Esc] Cancel"
    };
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} "))
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .render(popup, buf);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "failed to load config, using defaults");
        AppConfig::default()
    });
    let storage_dir = config.storage_dir()?;
    let storage = FileStorage::new(storage_dir);

    let bus = EventBus::new();
    let mut store = DashboardStore::load(Box::new(storage), bus);
    if let Some(section_id) = config.start_section.clone()
        && store.section(&section_id).is_some()
    {
        store.set_active_section(Some(section_id));
    }

    let mut registry = WidgetRegistry::new();
    lifeos_widgets::register_defaults(&mut registry);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, registry);

    let tick_rate = Duration::from_millis(100);
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let buf = f.buffer_mut();
            app.draw(area, buf);
        })?;

        if event::poll(tick_rate)?
            && let CEvent::Key(key) = event::read()?
        {
            // Only handle key press events, not key release
            if key.kind == crossterm::event::KeyEventKind::Press && app.handle_key(key) {
                break;
            }
        }

        app.drain_events();
    }

    for view in app.views.iter_mut() {
        view.unmount();
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
