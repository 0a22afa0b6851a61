//! Core building blocks for the LifeOS dashboard: the configuration
//! store and its snapshot model, JSON persistence, the widget registry
//! and trait, the confirmation gate, grid layout math, and the event
//! bus that fans store mutations out to interested views.

pub mod config;
pub mod confirm;
pub mod event;
pub mod layout;
pub mod model;
pub mod persist;
pub mod registry;
pub mod store;
pub mod widget;

pub use config::{AppConfig, ConfigError};
pub use confirm::{ConfirmationGate, PendingConfirmation};
pub use event::{EventBus, StoreEvent, Subscription};
pub use layout::grid_areas;
pub use model::{ComponentInstance, GridSpan, Page, Section, Snapshot, fresh_id, merge_config};
pub use persist::{FileStorage, MemoryStorage, PersistError, STORAGE_KEY, StorageBackend};
pub use registry::{PlaceholderWidget, WidgetDescriptor, WidgetRegistry};
pub use store::{DashboardStore, NewComponent, SectionPatch, StoreError};
pub use widget::{Event, EventResult, Widget, WidgetContainer};
