use crate::model::Snapshot;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Versioned storage key for the dashboard snapshot. The schema version is
/// embedded in the key itself: bumping it abandons old persisted data
/// rather than migrating it.
pub const STORAGE_KEY: &str = "lifeos-dashboard-v1";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config directory not found")]
    NoConfigDir,
}

/// Durable key/value storage seam. One JSON document per key, mirroring the
/// independent per-store records of the original application.
pub trait StorageBackend: Send {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn write(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

impl<S: StorageBackend + Sync> StorageBackend for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        (**self).write(key, value)
    }
}

/// File-backed storage: each key becomes `<dir>/<key>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Default location under the platform config directory.
    pub fn default_dir() -> Result<PathBuf, PersistError> {
        dirs::config_dir()
            .map(|d| d.join("lifeos"))
            .ok_or(PersistError::NoConfigDir)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-process storage for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Serialize the snapshot under the versioned key. Called synchronously
/// after every store mutation (write-through).
pub fn save_snapshot(storage: &dyn StorageBackend, snapshot: &Snapshot) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    storage.write(STORAGE_KEY, &json)
}

/// Read the snapshot back. An absent key or a document that no longer
/// parses under the current schema yields the default snapshot; startup
/// never fails on bad persisted data.
pub fn load_snapshot(storage: &dyn StorageBackend) -> Snapshot {
    match storage.read(STORAGE_KEY) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("malformed dashboard snapshot, using default: {e}");
                Snapshot::default()
            }
        },
        Ok(None) => Snapshot::default(),
        Err(e) => {
            tracing::warn!("failed to read dashboard snapshot, using default: {e}");
            Snapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentInstance, GridSpan, Section};
    use serde_json::json;

    fn sample_snapshot() -> Snapshot {
        let mut section = Section::new("s1".into(), "Finance".into(), "DollarSign".into());
        section.components.push(ComponentInstance {
            id: "c1".into(),
            kind: "investments-hero".into(),
            title: "Net Worth".into(),
            config: json!({"totalNetWorth": 1234.5}),
            w: GridSpan::Two,
            h: GridSpan::One,
        });
        Snapshot {
            sections: vec![section],
            active_section_id: Some("s1".into()),
            active_page_id: None,
        }
    }

    #[test]
    fn round_trip_is_identity() {
        let storage = MemoryStorage::new();
        let snapshot = sample_snapshot();
        save_snapshot(&storage, &snapshot).unwrap();
        assert_eq!(load_snapshot(&storage), snapshot);
    }

    #[test]
    fn missing_key_yields_default() {
        let storage = MemoryStorage::new();
        assert_eq!(load_snapshot(&storage), Snapshot::default());
    }

    #[test]
    fn malformed_document_yields_default() {
        let storage = MemoryStorage::new();
        storage.write(STORAGE_KEY, "{not json").unwrap();
        assert_eq!(load_snapshot(&storage), Snapshot::default());
    }

    #[test]
    fn invalid_grid_span_yields_default() {
        let storage = MemoryStorage::new();
        let doc = json!({
            "sections": [{
                "id": "s1", "title": "X", "iconName": "Folder",
                "components": [{
                    "id": "c1", "type": "t", "title": "T",
                    "config": {}, "w": 3, "h": 1
                }],
                "pages": []
            }],
            "activeSectionId": null,
            "activePageId": null
        });
        storage.write(STORAGE_KEY, &doc.to_string()).unwrap();
        assert_eq!(load_snapshot(&storage), Snapshot::default());
    }

    #[test]
    fn data_under_other_key_is_ignored() {
        let storage = MemoryStorage::new();
        let snapshot = sample_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        // A schema bump changes STORAGE_KEY; the old key's data is simply
        // never read again.
        storage.write("lifeos-dashboard-v0", &json).unwrap();
        assert_eq!(load_snapshot(&storage), Snapshot::default());
    }
}
