use crate::model::GridSpan;
use crate::widget::Widget;
use once_cell::sync::OnceCell;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Builds widget views from a component instance's JSON config and carries
/// the per-type defaults the store consults when a component is created.
pub struct WidgetDescriptor {
    ctor: Box<dyn Fn(&Value) -> Box<dyn Widget> + Send + Sync>,
    default_config: Box<dyn Fn() -> Value + Send + Sync>,
    default_size: (GridSpan, GridSpan),
}

impl WidgetDescriptor {
    /// Descriptor for a widget with a typed config. The JSON config is
    /// parsed into `C`; a config that no longer matches the widget's schema
    /// falls back to `C::default()` — validation belongs to the widget, not
    /// the store.
    pub fn new<W, C>(build: fn(C) -> W) -> Self
    where
        W: Widget + 'static,
        C: DeserializeOwned + Serialize + Default + 'static,
    {
        Self {
            ctor: Box::new(move |value| {
                let config = serde_json::from_value::<C>(value.clone()).unwrap_or_default();
                Box::new(build(config))
            }),
            default_config: Box::new(|| {
                serde_json::to_value(C::default()).unwrap_or_else(|_| json!({}))
            }),
            default_size: (GridSpan::One, GridSpan::One),
        }
    }

    /// Entry in the size-override allowlist: components of this type start
    /// at the given size instead of 1x1.
    pub fn with_default_size(mut self, w: GridSpan, h: GridSpan) -> Self {
        self.default_size = (w, h);
        self
    }

    pub fn create(&self, config: &Value) -> Box<dyn Widget> {
        (self.ctor)(config)
    }

    pub fn default_config(&self) -> Value {
        (self.default_config)()
    }

    pub fn default_size(&self) -> (GridSpan, GridSpan) {
        self.default_size
    }
}

type DescriptorLoader = Box<dyn Fn() -> WidgetDescriptor + Send + Sync>;

/// Deferred descriptor: the loader runs at most once, on first resolution,
/// and every later resolution observes the same descriptor.
struct RegistryEntry {
    loader: DescriptorLoader,
    cell: OnceCell<WidgetDescriptor>,
}

impl RegistryEntry {
    fn descriptor(&self) -> &WidgetDescriptor {
        self.cell.get_or_init(|| (self.loader)())
    }
}

/// Static mapping from a widget-type key to its descriptor. Resolution
/// never fails: unknown keys degrade to a placeholder view.
#[derive(Default)]
pub struct WidgetRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget type. Descriptor construction is deferred until
    /// the type is first resolved.
    pub fn register(
        &mut self,
        name: &str,
        loader: impl Fn() -> WidgetDescriptor + Send + Sync + 'static,
    ) {
        self.entries.insert(
            name.to_string(),
            RegistryEntry {
                loader: Box::new(loader),
                cell: OnceCell::new(),
            },
        );
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn descriptor(&self, kind: &str) -> Option<&WidgetDescriptor> {
        self.entries.get(kind).map(|e| e.descriptor())
    }

    /// Resolve `kind` to a view. Unknown kinds get the generic placeholder
    /// rather than an error.
    pub fn create(&self, kind: &str, config: &Value) -> Box<dyn Widget> {
        match self.descriptor(kind) {
            Some(descriptor) => descriptor.create(config),
            None => Box::new(PlaceholderWidget::new(kind)),
        }
    }

    pub fn default_config(&self, kind: &str) -> Value {
        self.descriptor(kind)
            .map(|d| d.default_config())
            .unwrap_or_else(|| json!({}))
    }

    pub fn default_size(&self, kind: &str) -> (GridSpan, GridSpan) {
        self.descriptor(kind)
            .map(|d| d.default_size())
            .unwrap_or((GridSpan::One, GridSpan::One))
    }
}

/// Fallback view for component types no registered widget claims.
pub struct PlaceholderWidget {
    kind: String,
}

impl PlaceholderWidget {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
        }
    }
}

impl Widget for PlaceholderWidget {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let paragraph = Paragraph::new(format!("Unknown component: {}", self.kind))
            .style(Style::default().fg(Color::DarkGray));
        ratatui::widgets::Widget::render(paragraph, area, buf);
    }
}
