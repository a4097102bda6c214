//! Simulator
//!
//! Owns the tree, the working-directory cursor, the journal, and the snapshot
//! store. Every front end goes through this surface; queries hand back owned
//! copies, never live references into the tree.
//!
//! Mutating operations write a `START` journal record before doing anything
//! and a `SUCCESS` or `FAIL - <REASON>` record once the outcome is known.

use crate::error::{OpError, StorageError};
use crate::journal::{Journal, MemoryJournalSink, STATUS_START, STATUS_SUCCESS};
use crate::store::{MemorySnapshotStore, Snapshot, SnapshotStore};
use crate::tree::naming::{next_free_name, validate_name};
use crate::tree::{resolve_directory, Node, NodeBody, Tree};
use crate::types::{ChildEntry, CopyOutcome, NodeId, TreeEntry, TreeStats};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const OP_MKDIR: &str = "MKDIR";
pub const OP_MKFILE: &str = "MKFILE";
pub const OP_DELETE: &str = "DELETE";
pub const OP_RENAME: &str = "RENAME";
pub const OP_COPY: &str = "COPY";
pub const OP_WRITE: &str = "WRITE";

pub struct Simulator {
    tree: Tree,
    cwd: NodeId,
    journal: Journal,
    store: Arc<dyn SnapshotStore>,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cwd", &self.current_path())
            .field("nodes", &self.tree.len())
            .field("journal", &self.journal)
            .field("store", &self.store.describe())
            .finish()
    }
}

impl Simulator {
    /// Fresh simulator: root only, cursor at root.
    pub fn new(store: Arc<dyn SnapshotStore>, journal: Journal) -> Self {
        let tree = Tree::new();
        let cwd = tree.root();
        Self {
            tree,
            cwd,
            journal,
            store,
        }
    }

    /// Simulator with in-memory snapshot store and journal.
    pub fn ephemeral() -> Self {
        Self::new(
            Arc::new(MemorySnapshotStore::new()),
            Journal::new(Arc::new(MemoryJournalSink::new())),
        )
    }

    /// Restore from `store`, or start fresh.
    ///
    /// A missing, unreadable, or invalid snapshot is a normal startup path:
    /// it is logged and a brand-new tree is returned.
    pub fn load(store: Arc<dyn SnapshotStore>, journal: Journal) -> Self {
        let restored = match store.load() {
            Ok(Some(snapshot)) => match snapshot.restore() {
                Ok(restored) => Some(restored),
                Err(e) => {
                    warn!(store = %store.describe(), "Snapshot rejected, starting empty: {}", e);
                    None
                }
            },
            Ok(None) => {
                debug!(store = %store.describe(), "No snapshot found, starting empty");
                None
            }
            Err(e) => {
                warn!(store = %store.describe(), "Failed to read snapshot, starting empty: {}", e);
                None
            }
        };

        match restored {
            Some((tree, cwd)) => {
                info!(
                    store = %store.describe(),
                    nodes = tree.len(),
                    cwd = %tree.path_of(cwd),
                    "Snapshot restored"
                );
                Self {
                    tree,
                    cwd,
                    journal,
                    store,
                }
            }
            None => Self::new(store, journal),
        }
    }

    /// Read-only view of the tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn current_path(&self) -> String {
        self.tree.path_of(self.cwd)
    }

    pub fn list_children(&self) -> Vec<ChildEntry> {
        self.entries_of(self.cwd)
    }

    /// List the directory `path` resolves to (blank means the cursor).
    pub fn list_directory(&self, path: Option<&str>) -> Result<Vec<ChildEntry>, OpError> {
        let dir = resolve_directory(&self.tree, self.cwd, path)
            .ok_or_else(|| OpError::NotFound(path.unwrap_or_default().to_string()))?;
        Ok(self.entries_of(dir))
    }

    fn entries_of(&self, dir: NodeId) -> Vec<ChildEntry> {
        self.tree
            .children(dir)
            .iter()
            .filter_map(|id| self.tree.get(*id))
            .map(|node| ChildEntry {
                name: node.name().to_string(),
                kind: node.kind(),
            })
            .collect()
    }

    /// Move the cursor to a child directory, or one level up with `..`.
    ///
    /// Returns false, without moving, at the root for `..`, for a missing
    /// child, and for a child that is a file.
    pub fn change_directory(&mut self, name: &str) -> bool {
        if name == ".." {
            return match self.tree.parent(self.cwd) {
                Some(parent) => {
                    self.cwd = parent;
                    true
                }
                None => {
                    debug!("cd ..: already at root");
                    false
                }
            };
        }

        match self.tree.find_child(self.cwd, name) {
            Some(child) if self.tree.is_dir(child) => {
                self.cwd = child;
                true
            }
            Some(_) => {
                debug!(name = name, "cd: not a directory");
                false
            }
            None => {
                debug!(name = name, "cd: no such entry");
                false
            }
        }
    }

    /// Move the cursor to whatever directory `path` resolves to.
    pub fn change_directory_path(&mut self, path: &str) -> bool {
        match resolve_directory(&self.tree, self.cwd, Some(path)) {
            Some(dir) => {
                self.cwd = dir;
                true
            }
            None => {
                debug!(path = path, "cd: path does not resolve to a directory");
                false
            }
        }
    }

    pub fn make_directory(&mut self, name: &str) -> Result<(), OpError> {
        self.journaled(OP_MKDIR, name, |sim| {
            validate_name(name)?;
            sim.tree
                .insert_child(sim.cwd, name, NodeBody::empty_directory())?;
            Ok(())
        })
    }

    pub fn make_file(&mut self, name: &str, content: &str) -> Result<(), OpError> {
        self.journaled(OP_MKFILE, name, |sim| {
            validate_name(name)?;
            sim.tree
                .insert_child(sim.cwd, name, NodeBody::file(content))?;
            Ok(())
        })
    }

    /// Remove a child of the cursor directory together with its subtree.
    ///
    /// If the cursor was inside the removed subtree it moves to the removed
    /// node's parent, the nearest surviving ancestor.
    pub fn remove(&mut self, name: &str) -> Result<(), OpError> {
        self.journaled(OP_DELETE, name, |sim| {
            let id = sim.child_of_cwd(name)?;
            // Only children of the cursor are removable, so the cursor survives.
            debug_assert!(!sim.tree.is_ancestor_or_self(id, sim.cwd));
            let removed = sim.tree.remove_subtree(id)?;
            debug!(name = name, nodes = removed.len(), "Removed subtree");
            Ok(())
        })
    }

    /// Rename a child of the cursor directory.
    ///
    /// The destination name is checked for a collision before the source is
    /// looked up, so a clash is always reported as `NameCollision`.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<(), OpError> {
        let target = format!("{} -> {}", old_name, new_name);
        self.journaled(OP_RENAME, &target, |sim| {
            validate_name(new_name)?;
            if sim.tree.find_child(sim.cwd, new_name).is_some() {
                return Err(OpError::NameCollision(new_name.to_string()));
            }
            let id = sim.child_of_cwd(old_name)?;
            sim.tree.rename(id, new_name)
        })
    }

    /// Copy a file child of the cursor into the directory `destination`
    /// resolves to (blank, `.` or `None` means the cursor itself).
    ///
    /// On a name clash the copy is renamed `stem1.ext`, `stem2.ext`, ... so
    /// it never fails for that reason. Directories are not copied.
    pub fn copy(&mut self, source: &str, destination: Option<&str>) -> Result<CopyOutcome, OpError> {
        let destination = destination.filter(|d| !d.trim().is_empty());
        let target = format!("{} -> {}", source, destination.unwrap_or("."));
        self.journaled(OP_COPY, &target, |sim| {
            let source_id = sim.child_of_cwd(source)?;
            let dest = resolve_directory(&sim.tree, sim.cwd, destination).ok_or_else(|| {
                OpError::InvalidTarget(destination.unwrap_or(".").to_string())
            })?;

            let (name, content) = match sim.tree.get(source_id) {
                Some(node) => match node.content() {
                    Some(content) => (node.name().to_string(), content.to_string()),
                    None => {
                        return Err(OpError::Unsupported(format!(
                            "'{}' is a directory; recursive copy is not supported",
                            source
                        )))
                    }
                },
                None => return Err(OpError::NotFound(source.to_string())),
            };

            let final_name = next_free_name(&name, |n| sim.tree.find_child(dest, n).is_some());
            let id = sim
                .tree
                .insert_child(dest, &final_name, NodeBody::file(content))?;
            Ok(CopyOutcome {
                final_name,
                destination_path: sim.tree.path_of(id),
            })
        })
    }

    /// Content of a file child of the cursor. Directories are reported as not found.
    pub fn file_content(&self, name: &str) -> Result<String, OpError> {
        self.tree
            .find_child(self.cwd, name)
            .and_then(|id| self.tree.get(id))
            .and_then(Node::content)
            .map(str::to_string)
            .ok_or_else(|| OpError::NotFound(name.to_string()))
    }

    /// Replace the content of an existing file child of the cursor.
    pub fn write_file(&mut self, name: &str, content: &str) -> Result<(), OpError> {
        self.journaled(OP_WRITE, name, |sim| {
            let id = sim.child_of_cwd(name)?;
            if sim.tree.set_content(id, content) {
                Ok(())
            } else {
                Err(OpError::NotFound(name.to_string()))
            }
        })
    }

    /// Pre-order listing of the whole tree.
    pub fn walk(&self) -> Vec<TreeEntry> {
        self.tree.walk(self.tree.root())
    }

    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.tree, self.cwd)
    }

    /// Persist the whole tree and cursor, replacing any previous snapshot.
    pub fn try_save(&self) -> Result<(), StorageError> {
        self.store.save(&self.snapshot())?;
        info!(
            store = %self.store.describe(),
            nodes = self.tree.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// Like `try_save`, but failures only reach the diagnostic channel.
    /// Returns whether the snapshot was written.
    pub fn save(&self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                error!(store = %self.store.describe(), "Failed to save snapshot: {}", e);
                false
            }
        }
    }

    fn child_of_cwd(&self, name: &str) -> Result<NodeId, OpError> {
        self.tree
            .find_child(self.cwd, name)
            .ok_or_else(|| OpError::NotFound(name.to_string()))
    }

    fn journaled<T, F>(&mut self, operation: &str, target: &str, op: F) -> Result<T, OpError>
    where
        F: FnOnce(&mut Self) -> Result<T, OpError>,
    {
        self.journal.record(operation, target, STATUS_START);
        let result = op(self);
        match &result {
            Ok(_) => {
                self.journal.record(operation, target, STATUS_SUCCESS);
                debug!(operation = operation, target = target, "Operation succeeded");
            }
            Err(e) => {
                let status = format!("FAIL - {}", e.journal_reason());
                self.journal.record(operation, target, &status);
                debug!(operation = operation, target = target, "Operation failed: {}", e);
            }
        }
        result
    }
}
