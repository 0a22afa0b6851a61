use ratatui::{buffer::Buffer, layout::Rect};
use serde_json::Value;

/// View over one component instance. Widgets are constructed from the
/// instance's JSON config by their registry descriptor and re-parse it when
/// the store reports a config change.
pub trait Widget: Send + Sync {
    /// Called once when the view is added to the screen.
    fn on_mount(&mut self) {}

    /// Called after `update_component_config` touched the owning instance.
    fn on_config_updated(&mut self, _config: &Value) {}

    /// Handle input routed to the focused widget.
    fn on_event(&mut self, _event: Event) -> EventResult {
        EventResult::Ignored
    }

    /// Render the widget body into its grid cell.
    fn render(&mut self, area: Rect, buf: &mut Buffer);

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, _focused: bool) {
        self.render(area, buf);
    }

    /// Cleanup when the view is removed.
    fn on_unmount(&mut self) {}
}

#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

/// Pairs a widget view with the component instance it displays and tracks
/// its mount state.
pub struct WidgetContainer {
    component_id: String,
    widget: Box<dyn Widget>,
    mounted: bool,
}

impl WidgetContainer {
    pub fn new(component_id: String, widget: Box<dyn Widget>) -> Self {
        Self {
            component_id,
            widget,
            mounted: false,
        }
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn mount(&mut self) {
        if !self.mounted {
            self.widget.on_mount();
            self.mounted = true;
        }
    }

    pub fn config_updated(&mut self, config: &Value) {
        self.widget.on_config_updated(config);
    }

    pub fn handle_event(&mut self, event: Event) -> EventResult {
        self.widget.on_event(event)
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.widget.render(area, buf);
    }

    pub fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        self.widget.render_focused(area, buf, focused);
    }

    pub fn unmount(&mut self) {
        if self.mounted {
            self.widget.on_unmount();
            self.mounted = false;
        }
    }
}
