//! StorageConfig and resolve_paths for snapshot and journal files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SNAPSHOT_PATH: &str = "virtual_disk.json";
pub const DEFAULT_JOURNAL_PATH: &str = "filesystem_journal.log";
pub const DEFAULT_SAVE_ON_EXIT: bool = true;

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}

fn default_journal_path() -> PathBuf {
    PathBuf::from(DEFAULT_JOURNAL_PATH)
}

fn default_save_on_exit() -> bool {
    DEFAULT_SAVE_ON_EXIT
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Snapshot file (relative paths are under the workspace root)
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Journal file (relative paths are under the workspace root)
    #[serde(default = "default_journal_path")]
    pub journal_path: PathBuf,

    /// Save the snapshot when the shell exits
    #[serde(default = "default_save_on_exit")]
    pub save_on_exit: bool,
}

impl StorageConfig {
    /// Resolve (snapshot, journal) paths against the workspace root.
    /// Absolute paths are used as-is.
    pub fn resolve_paths(&self, workspace_root: &Path) -> (PathBuf, PathBuf) {
        (
            workspace_root.join(&self.snapshot_path),
            workspace_root.join(&self.journal_path),
        )
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            journal_path: default_journal_path(),
            save_on_exit: default_save_on_exit(),
        }
    }
}
