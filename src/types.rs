//! Core types shared by the tree, the simulator, and the front ends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NodeId: slot index of a node inside the tree arena
///
/// Ids are only meaningful for the tree that issued them and are never
/// persisted; snapshots identify nodes by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    /// Listing tag used by the shell and the CLI (`[DIR] ` / `[FILE]`).
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Directory => "[DIR] ",
            NodeKind::File => "[FILE]",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Directory => write!(f, "directory"),
            NodeKind::File => write!(f, "file"),
        }
    }
}

/// One row of a directory listing. Owned copy, never a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEntry {
    pub name: String,
    pub kind: NodeKind,
}

/// One row of a whole-tree walk (pre-order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub kind: NodeKind,
    pub depth: usize,
}

/// Aggregate counters for the whole tree. The root directory is not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
    pub content_bytes: usize,
}

/// Result of a successful copy: the name the new file received and its full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub final_name: String,
    pub destination_path: String,
}
