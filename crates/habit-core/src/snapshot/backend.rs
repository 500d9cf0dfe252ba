//! Storage slots for the snapshot store.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::Result;

/// Default snapshot file name, versioned with the record shape.
pub const DEFAULT_SNAPSHOT_FILE: &str = "habit-score.habits.v1.json";

/// A single named slot holding the serialized habit array.
pub trait SnapshotBackend {
    /// Load the raw payload; `Ok(None)` when the slot is empty.
    fn load_raw(&self) -> Result<Option<String>>;

    /// Replace the raw payload.
    fn save_raw(&self, raw: &str) -> Result<()>;
}

/// Snapshot slot backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotBackend {
    path: PathBuf,
}

impl FileSnapshotBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotBackend for FileSnapshotBackend {
    fn load_raw(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save_raw(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-process slot. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotBackend {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySnapshotBackend {
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// Current raw payload, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SnapshotBackend for MemorySnapshotBackend {
    fn load_raw(&self) -> Result<Option<String>> {
        Ok(self.raw())
    }

    fn save_raw(&self, raw: &str) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_backend_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let backend = FileSnapshotBackend::new(dir.path().join("missing.json"));
        assert_eq!(backend.load_raw().unwrap(), None);
    }

    #[test]
    fn file_backend_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let backend = FileSnapshotBackend::new(dir.path().join("nested").join(DEFAULT_SNAPSHOT_FILE));
        backend.save_raw("[]").unwrap();
        assert_eq!(backend.load_raw().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn memory_backend_clones_share_slot() {
        let backend = MemorySnapshotBackend::default();
        let observer = backend.clone();
        backend.save_raw("[1]").unwrap();
        assert_eq!(observer.raw().as_deref(), Some("[1]"));
    }
}
