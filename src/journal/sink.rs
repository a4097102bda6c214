//! Journal sinks: where records end up.

use crate::error::StorageError;
use crate::journal::JournalEntry;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait JournalSink: Send + Sync {
    fn append(&self, entry: &JournalEntry) -> Result<(), StorageError>;
    /// Short human-readable description for diagnostics.
    fn describe(&self) -> String;
}

/// Appends one line per record to a text file.
///
/// The file is opened in append mode for each record and closed again, so
/// no handle outlives a single `append` call.
#[derive(Debug, Clone)]
pub struct FileJournalSink {
    path: PathBuf,
}

impl FileJournalSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JournalSink for FileJournalSink {
    fn append(&self, entry: &JournalEntry) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Keeps records in memory. Used by tests and by embedders that want to
/// inspect the journal without touching disk.
#[derive(Debug, Default)]
pub struct MemoryJournalSink {
    entries: Mutex<Vec<JournalEntry>>,
}

impl MemoryJournalSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl JournalSink for MemoryJournalSink {
    fn append(&self, entry: &JournalEntry) -> Result<(), StorageError> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
