use crate::event::{EventBus, StoreEvent};
use crate::model::{ComponentInstance, GridSpan, Page, Section, Snapshot, fresh_id, merge_config};
use crate::persist::{self, MemoryStorage, StorageBackend};
use crate::registry::WidgetRegistry;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("section not found: {0}")]
    SectionNotFound(String),
    #[error("component not found: {0}")]
    ComponentNotFound(String),
    #[error("page not found: {0}")]
    PageNotFound(String),
}

/// Partial update for a section's editable fields.
#[derive(Debug, Clone, Default)]
pub struct SectionPatch {
    pub title: Option<String>,
    pub icon_name: Option<String>,
}

/// Blueprint for a component instance about to be added to a section.
#[derive(Debug, Clone)]
pub struct NewComponent {
    pub kind: String,
    pub title: String,
    pub config: Option<Value>,
    pub w: GridSpan,
    pub h: GridSpan,
}

impl NewComponent {
    pub fn new(kind: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            config: None,
            w: GridSpan::One,
            h: GridSpan::One,
        }
    }

    /// Blueprint filled in from the registry: title-cased name, the type's
    /// default config, and its default size (1x1 unless the descriptor
    /// overrides it).
    pub fn for_type(registry: &WidgetRegistry, kind: &str) -> Self {
        let (w, h) = registry.default_size(kind);
        Self {
            kind: kind.to_string(),
            title: title_case(kind),
            config: Some(registry.default_config(kind)),
            w,
            h,
        }
    }

    pub fn with_size(mut self, w: GridSpan, h: GridSpan) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }
}

fn title_case(kind: &str) -> String {
    kind.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single source of truth for all sections. Every mutation runs to
/// completion synchronously, persists write-through, and publishes a
/// [`StoreEvent`]. Constructed explicitly and passed by reference to
/// consumers; tests instantiate independent in-memory copies.
pub struct DashboardStore {
    snapshot: Snapshot,
    storage: Box<dyn StorageBackend>,
    bus: EventBus,
}

impl DashboardStore {
    /// Read the persisted snapshot once at startup; bad or absent data
    /// falls back to the default snapshot.
    pub fn load(storage: Box<dyn StorageBackend>, bus: EventBus) -> Self {
        let snapshot = persist::load_snapshot(storage.as_ref());
        Self {
            snapshot,
            storage,
            bus,
        }
    }

    /// Ephemeral store backed by process memory.
    pub fn in_memory() -> Self {
        Self {
            snapshot: Snapshot::default(),
            storage: Box::new(MemoryStorage::new()),
            bus: EventBus::new(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn sections(&self) -> &[Section] {
        &self.snapshot.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.snapshot.section(id)
    }

    pub fn active_section(&self) -> Option<&Section> {
        self.snapshot
            .active_section_id
            .as_deref()
            .and_then(|id| self.snapshot.section(id))
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn add_section(&mut self, title: &str, icon_name: &str) -> Result<String, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let id = fresh_id();
        self.snapshot.sections.push(Section::new(
            id.clone(),
            title.to_string(),
            icon_name.to_string(),
        ));
        self.commit(StoreEvent::SectionAdded {
            section_id: id.clone(),
        });
        Ok(id)
    }

    /// Removes the section together with all its components and pages.
    /// Clears the active pointers if they referenced the removed section.
    pub fn remove_section(&mut self, id: &str) -> Result<(), StoreError> {
        let idx = self
            .snapshot
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::SectionNotFound(id.to_string()))?;
        let removed = self.snapshot.sections.remove(idx);
        if self.snapshot.active_section_id.as_deref() == Some(id) {
            self.snapshot.active_section_id = None;
        }
        if let Some(page_id) = self.snapshot.active_page_id.as_deref()
            && removed.pages.iter().any(|p| p.id == page_id)
        {
            self.snapshot.active_page_id = None;
        }
        self.commit(StoreEvent::SectionRemoved {
            section_id: id.to_string(),
        });
        Ok(())
    }

    pub fn update_section(&mut self, id: &str, patch: SectionPatch) -> Result<(), StoreError> {
        let section = self
            .snapshot
            .section_mut(id)
            .ok_or_else(|| StoreError::SectionNotFound(id.to_string()))?;
        if let Some(title) = patch.title {
            section.title = title;
        }
        if let Some(icon_name) = patch.icon_name {
            section.icon_name = icon_name;
        }
        self.commit(StoreEvent::SectionUpdated {
            section_id: id.to_string(),
        });
        Ok(())
    }

    pub fn add_page(&mut self, section_id: &str, title: &str) -> Result<String, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let section = self
            .snapshot
            .section_mut(section_id)
            .ok_or_else(|| StoreError::SectionNotFound(section_id.to_string()))?;
        let id = fresh_id();
        section.pages.push(Page {
            id: id.clone(),
            title: title.to_string(),
            components: Vec::new(),
        });
        self.commit(StoreEvent::PageAdded {
            section_id: section_id.to_string(),
            page_id: id.clone(),
        });
        Ok(id)
    }

    pub fn remove_page(&mut self, section_id: &str, page_id: &str) -> Result<(), StoreError> {
        let section = self
            .snapshot
            .section_mut(section_id)
            .ok_or_else(|| StoreError::SectionNotFound(section_id.to_string()))?;
        let before = section.pages.len();
        section.pages.retain(|p| p.id != page_id);
        if section.pages.len() == before {
            return Err(StoreError::PageNotFound(page_id.to_string()));
        }
        if self.snapshot.active_page_id.as_deref() == Some(page_id) {
            self.snapshot.active_page_id = None;
        }
        self.commit(StoreEvent::PageRemoved {
            section_id: section_id.to_string(),
            page_id: page_id.to_string(),
        });
        Ok(())
    }

    /// Pure pointer write, deliberately unvalidated against existence so
    /// navigation can point at a section before its data arrives.
    pub fn set_active_section(&mut self, id: Option<String>) {
        self.snapshot.active_section_id = id.clone();
        self.commit(StoreEvent::ActiveSectionChanged { section_id: id });
    }

    pub fn set_active_page(&mut self, id: Option<String>) {
        self.snapshot.active_page_id = id.clone();
        self.commit(StoreEvent::ActivePageChanged { page_id: id });
    }

    pub fn add_component(
        &mut self,
        section_id: &str,
        new: NewComponent,
    ) -> Result<String, StoreError> {
        let section = self
            .snapshot
            .section_mut(section_id)
            .ok_or_else(|| StoreError::SectionNotFound(section_id.to_string()))?;
        let id = fresh_id();
        section.components.push(ComponentInstance {
            id: id.clone(),
            kind: new.kind,
            title: new.title,
            config: new.config.unwrap_or_else(|| Value::Object(Default::default())),
            w: new.w,
            h: new.h,
        });
        self.commit(StoreEvent::ComponentAdded {
            section_id: section_id.to_string(),
            component_id: id.clone(),
        });
        Ok(id)
    }

    pub fn remove_component(
        &mut self,
        section_id: &str,
        component_id: &str,
    ) -> Result<(), StoreError> {
        let section = self
            .snapshot
            .section_mut(section_id)
            .ok_or_else(|| StoreError::SectionNotFound(section_id.to_string()))?;
        let before = section.components.len();
        section.components.retain(|c| c.id != component_id);
        if section.components.len() == before {
            return Err(StoreError::ComponentNotFound(component_id.to_string()));
        }
        self.commit(StoreEvent::ComponentRemoved {
            section_id: section_id.to_string(),
            component_id: component_id.to_string(),
        });
        Ok(())
    }

    /// Stable move: the element at `old_index` is removed and reinserted so
    /// it ends up at `new_index`, with every other relative order preserved.
    /// Out-of-range indices are clamped to `[0, len - 1]`; an empty list is
    /// left untouched.
    pub fn reorder_components(
        &mut self,
        section_id: &str,
        old_index: usize,
        new_index: usize,
    ) -> Result<(), StoreError> {
        let section = self
            .snapshot
            .section_mut(section_id)
            .ok_or_else(|| StoreError::SectionNotFound(section_id.to_string()))?;
        let len = section.components.len();
        if len == 0 {
            return Ok(());
        }
        let old_index = old_index.min(len - 1);
        let new_index = new_index.min(len - 1);
        if old_index != new_index {
            let component = section.components.remove(old_index);
            section.components.insert(new_index, component);
        }
        self.commit(StoreEvent::ComponentsReordered {
            section_id: section_id.to_string(),
        });
        Ok(())
    }

    pub fn update_component_size(
        &mut self,
        section_id: &str,
        component_id: &str,
        w: GridSpan,
        h: GridSpan,
    ) -> Result<(), StoreError> {
        let component = self.component_mut(section_id, component_id)?;
        component.w = w;
        component.h = h;
        self.commit(StoreEvent::ComponentResized {
            section_id: section_id.to_string(),
            component_id: component_id.to_string(),
        });
        Ok(())
    }

    /// Shallow-merges `partial` into the component's config. Widgets send
    /// only the fields they changed; untouched keys survive.
    pub fn update_component_config(
        &mut self,
        section_id: &str,
        component_id: &str,
        partial: &Value,
    ) -> Result<(), StoreError> {
        let component = self.component_mut(section_id, component_id)?;
        component.config = merge_config(&component.config, partial);
        self.commit(StoreEvent::ConfigUpdated {
            section_id: section_id.to_string(),
            component_id: component_id.to_string(),
        });
        Ok(())
    }

    pub fn reset_to_default(&mut self) {
        self.snapshot = Snapshot::default();
        self.commit(StoreEvent::SnapshotReset);
    }

    fn component_mut(
        &mut self,
        section_id: &str,
        component_id: &str,
    ) -> Result<&mut ComponentInstance, StoreError> {
        let section = self
            .snapshot
            .section_mut(section_id)
            .ok_or_else(|| StoreError::SectionNotFound(section_id.to_string()))?;
        section
            .components
            .iter_mut()
            .find(|c| c.id == component_id)
            .ok_or_else(|| StoreError::ComponentNotFound(component_id.to_string()))
    }

    fn commit(&self, event: StoreEvent) {
        self.persist();
        self.bus.publish(event);
    }

    /// Write-through. A failed write is logged but never fails the
    /// mutation; the in-memory snapshot stays authoritative.
    fn persist(&self) {
        if let Err(e) = persist::save_snapshot(self.storage.as_ref(), &self.snapshot) {
            tracing::warn!("failed to persist dashboard snapshot: {e}");
        }
    }
}
