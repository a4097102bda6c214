//! Snapshot store backends.

use super::{Snapshot, SnapshotStore};
use crate::error::StorageError;
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stores the snapshot as a single JSON file.
///
/// Saves go through a temp file in the same directory which is synced and
/// then renamed over the target, so a crash mid-write leaves the previous
/// snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "snapshot".to_string());
        self.path
            .with_file_name(format!(".{}.tmp.{}", file_name, std::process::id()))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let json = snapshot.to_json()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        let write_result = (|| -> Result<(), StorageError> {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            Ok(())
        })();

        if let Err(e) = write_result {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::IoError(e));
        }

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "Snapshot written");
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::IoError(e)),
        };
        Snapshot::from_json(&json).map(Some)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Holds the serialized snapshot in memory. Goes through the same JSON
/// encoding as the file store.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    json: Mutex<Option<String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw JSON, valid or not.
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            json: Mutex::new(Some(json.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.json.lock().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let json = snapshot.to_json()?;
        *self.json.lock() = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        match self.json.lock().as_deref() {
            Some(json) => Snapshot::from_json(json).map(Some),
            None => Ok(None),
        }
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
