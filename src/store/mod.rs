//! Snapshot Store
//!
//! Whole-tree persistence. A snapshot holds the complete node graph plus the
//! cursor position (as an absolute path) and nothing else; the journal is
//! never part of it.
//!
//! Nodes are stored as a flat pre-order list of records, each pointing at
//! its parent by record index. Nesting depth in the tree never becomes
//! nesting depth in the document, and both capture and restore are loops.

pub mod persistence;

use crate::error::{OpError, StorageError};
use crate::tree::naming::validate_name;
use crate::tree::{resolve_directory, NodeBody, Tree};
use crate::types::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};

pub use persistence::{FileSnapshotStore, MemorySnapshotStore};

/// Current on-disk snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// SnapshotRecord: one node of the persisted tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub name: String,
    pub kind: NodeKind,
    /// Index of the parent record; `None` for children of the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    /// File content; absent for directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Complete persisted state of a simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// RFC 3339 time of capture; informational only
    pub saved_at: String,
    /// Absolute path of the cursor at capture time
    pub cwd: String,
    /// Every node except the root, in pre-order
    #[serde(default)]
    pub nodes: Vec<SnapshotRecord>,
}

impl Snapshot {
    /// Capture `tree` and the cursor `cwd`.
    pub fn capture(tree: &Tree, cwd: NodeId) -> Self {
        let mut nodes = Vec::with_capacity(tree.len().saturating_sub(1));
        let mut stack: Vec<(NodeId, Option<usize>)> = tree
            .children(tree.root())
            .iter()
            .rev()
            .map(|child| (*child, None))
            .collect();
        while let Some((id, parent)) = stack.pop() {
            let Some(node) = tree.get(id) else { continue };
            let index = nodes.len();
            nodes.push(SnapshotRecord {
                name: node.name().to_string(),
                kind: node.kind(),
                parent,
                content: node.content().map(str::to_string),
            });
            stack.extend(node.children().iter().rev().map(|child| (*child, Some(index))));
        }

        Self {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            cwd: tree.path_of(cwd),
            nodes,
        }
    }

    /// Rebuild a tree and cursor from this snapshot.
    ///
    /// Every record must carry a valid name that is unique among its
    /// siblings, and must name as parent an earlier directory record. A
    /// cursor path that no longer resolves falls back to the root.
    pub fn restore(&self) -> Result<(Tree, NodeId), StorageError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut tree = Tree::new();
        let root = tree.root();
        let mut ids: Vec<NodeId> = Vec::with_capacity(self.nodes.len());
        for (index, record) in self.nodes.iter().enumerate() {
            let invalid = |e: OpError| {
                StorageError::InvalidSnapshot(format!("record {} ({:?}): {}", index, record.name, e))
            };

            let parent = match record.parent {
                None => root,
                Some(p) => ids.get(p).copied().ok_or_else(|| {
                    StorageError::InvalidSnapshot(format!(
                        "record {} refers to parent {} which does not precede it",
                        index, p
                    ))
                })?,
            };
            validate_name(&record.name).map_err(invalid)?;
            let body = match (record.kind, record.content.as_deref()) {
                (NodeKind::Directory, None) => NodeBody::empty_directory(),
                (NodeKind::Directory, Some(_)) => {
                    return Err(StorageError::InvalidSnapshot(format!(
                        "record {} is a directory with content",
                        index
                    )))
                }
                (NodeKind::File, content) => NodeBody::file(content.unwrap_or_default()),
            };
            let id = tree
                .insert_child(parent, &record.name, body)
                .map_err(invalid)?;
            ids.push(id);
        }

        let cwd = match resolve_directory(&tree, root, Some(&self.cwd)) {
            Some(cwd) => cwd,
            None => {
                tracing::warn!(
                    "Snapshot cursor {} does not resolve, starting at /",
                    self.cwd
                );
                root
            }
        };
        Ok((tree, cwd))
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Snapshot persistence port
pub trait SnapshotStore: Send + Sync {
    /// Replace any previously stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Snapshot>, StorageError>;
    /// Short human-readable description for diagnostics.
    fn describe(&self) -> String;
}
