use crossbeam::channel::{Receiver, Sender, unbounded};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Notification published by the store after each mutation. Readers (UI
/// layers, caches) subscribe by topic and re-read the snapshot; the event
/// itself only carries the ids needed to invalidate derived state.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    SectionAdded { section_id: String },
    SectionRemoved { section_id: String },
    SectionUpdated { section_id: String },
    PageAdded { section_id: String, page_id: String },
    PageRemoved { section_id: String, page_id: String },
    ComponentAdded { section_id: String, component_id: String },
    ComponentRemoved { section_id: String, component_id: String },
    ComponentsReordered { section_id: String },
    ComponentResized { section_id: String, component_id: String },
    ConfigUpdated { section_id: String, component_id: String },
    ActiveSectionChanged { section_id: Option<String> },
    ActivePageChanged { page_id: Option<String> },
    SnapshotReset,
}

impl StoreEvent {
    /// Dotted topic used for subscription matching.
    pub fn topic(&self) -> &'static str {
        match self {
            StoreEvent::SectionAdded { .. } => "section.added",
            StoreEvent::SectionRemoved { .. } => "section.removed",
            StoreEvent::SectionUpdated { .. } => "section.updated",
            StoreEvent::PageAdded { .. } => "page.added",
            StoreEvent::PageRemoved { .. } => "page.removed",
            StoreEvent::ComponentAdded { .. } => "component.added",
            StoreEvent::ComponentRemoved { .. } => "component.removed",
            StoreEvent::ComponentsReordered { .. } => "component.reordered",
            StoreEvent::ComponentResized { .. } => "component.resized",
            StoreEvent::ConfigUpdated { .. } => "component.config",
            StoreEvent::ActiveSectionChanged { .. } => "active.section",
            StoreEvent::ActivePageChanged { .. } => "active.page",
            StoreEvent::SnapshotReset => "snapshot.reset",
        }
    }
}

/// Subscription handle; dropping it unsubscribes.
pub struct Subscription {
    id: usize,
    bus: Arc<EventBusInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut subs = self.bus.subscriptions.write().unwrap();
        subs.remove(&self.id);
    }
}

struct EventBusInner {
    subscriptions: RwLock<HashMap<usize, (String, Sender<StoreEvent>)>>,
    next_id: std::sync::atomic::AtomicUsize,
}

/// Topic-based pub/sub for store change notifications.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EventBusInner {
                subscriptions: RwLock::new(HashMap::new()),
                next_id: std::sync::atomic::AtomicUsize::new(0),
            }),
        }
    }

    /// Deliver an event to every subscriber whose pattern matches its topic.
    pub fn publish(&self, event: StoreEvent) {
        let subs = self.inner.subscriptions.read().unwrap();
        for (pattern, tx) in subs.values() {
            if Self::topic_matches(event.topic(), pattern) {
                // Subscriber may have dropped its receiver; ignore.
                let _ = tx.send(event.clone());
            }
        }
    }

    /// Subscribe to a topic pattern. `*` as the final segment matches any
    /// remainder; `*` alone matches everything.
    pub fn subscribe(&self, pattern: impl Into<String>) -> (Subscription, Receiver<StoreEvent>) {
        let (tx, rx) = unbounded();
        let pattern = pattern.into();
        let id = self
            .inner
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        {
            let mut subs = self.inner.subscriptions.write().unwrap();
            subs.insert(id, (pattern, tx));
        }
        let sub = Subscription {
            id,
            bus: self.inner.clone(),
        };
        (sub, rx)
    }

    fn topic_matches(topic: &str, pattern: &str) -> bool {
        if topic == pattern {
            return true;
        }
        let mut topic_parts = topic.split('.');
        let mut pattern_parts = pattern.split('.').peekable();
        loop {
            match (pattern_parts.next(), topic_parts.next()) {
                (None, None) => return true,
                (Some("*"), _) if pattern_parts.peek().is_none() => return true,
                (Some(p), Some(t)) if p == t => continue,
                _ => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_matching() {
        assert!(EventBus::topic_matches("section.added", "section.added"));
        assert!(EventBus::topic_matches("section.added", "section.*"));
        assert!(EventBus::topic_matches("component.config", "component.*"));
        assert!(!EventBus::topic_matches("section.added", "component.*"));
        assert!(EventBus::topic_matches("snapshot.reset", "*"));
        assert!(!EventBus::topic_matches("section.added", "section"));
    }

    #[test]
    fn publish_reaches_matching_subscriber() {
        let bus = EventBus::new();
        let (_sub, rx) = bus.subscribe("section.*");
        bus.publish(StoreEvent::SectionAdded {
            section_id: "s1".into(),
        });
        bus.publish(StoreEvent::ComponentAdded {
            section_id: "s1".into(),
            component_id: "c1".into(),
        });
        let event = rx.recv().unwrap();
        assert_eq!(event.topic(), "section.added");
        // The component event was filtered out.
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let bus = EventBus::new();
        let (sub, rx) = bus.subscribe("*");
        bus.publish(StoreEvent::SnapshotReset);
        assert!(rx.recv().is_ok());
        drop(sub);
        bus.publish(StoreEvent::SnapshotReset);
        assert!(rx.recv().is_err());
    }
}
