//! Arena-backed directory tree
//!
//! Owns every node of one simulated file system. Directories hold their
//! children as ordered `NodeId` lists and each child points back at its
//! parent by id, so there is exactly one owning edge per node.
//!
//! ### Invariants
//!
//! 1. **Single root**: `root` is a live directory with no parent; every other
//!    live node has a parent whose `children` list contains it exactly once.
//! 2. **Sibling uniqueness**: no two children of one directory share a name
//!    (exact, case-sensitive comparison).
//! 3. **No orphans**: removing a node frees its whole subtree.

use crate::error::OpError;
use crate::tree::node::{Node, NodeBody};
use crate::types::{NodeId, NodeKind, TreeEntry, TreeStats};

/// Stored name of the root directory. Never part of a path.
pub const ROOT_NAME: &str = "root";

#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only the root directory.
    pub fn new() -> Self {
        let root = Node {
            name: ROOT_NAME.to_string(),
            parent: None,
            body: NodeBody::empty_directory(),
        };
        Self {
            slots: vec![Some(root)],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(Node::kind)
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        self.get(id).map(Node::is_dir).unwrap_or(false)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Look up a direct child of `dir` by exact name.
    pub fn find_child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.children(dir)
            .iter()
            .copied()
            .find(|child| self.get(*child).map(|n| n.name == name).unwrap_or(false))
    }

    /// Append a new node under `parent`.
    ///
    /// Fails with `NameCollision` if a sibling already uses `name`, and with
    /// `InvalidTarget` if `parent` is not a live directory.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        name: &str,
        body: NodeBody,
    ) -> Result<NodeId, OpError> {
        if !self.is_dir(parent) {
            return Err(OpError::InvalidTarget(self.path_of(parent)));
        }
        if self.find_child(parent, name).is_some() {
            return Err(OpError::NameCollision(name.to_string()));
        }

        let node = Node {
            name: name.to_string(),
            parent: Some(parent),
            body,
        };
        let id = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };

        if let Some(Node {
            body: NodeBody::Directory(dir),
            ..
        }) = self.get_mut(parent)
        {
            dir.children.push(id);
        }
        Ok(id)
    }

    /// Detach `id` from its parent and free it together with its subtree.
    ///
    /// Returns every freed id (pre-order, `id` first). The root cannot be removed.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<Vec<NodeId>, OpError> {
        let parent = match self.get(id) {
            None => return Err(OpError::NotFound(format!("#{}", id.0))),
            Some(node) => match node.parent {
                None => return Err(OpError::Unsupported("removing the root directory".into())),
                Some(parent) => parent,
            },
        };

        if let Some(Node {
            body: NodeBody::Directory(dir),
            ..
        }) = self.get_mut(parent)
        {
            dir.children.retain(|child| *child != id);
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.slots.get_mut(current.0).and_then(Option::take) {
                removed.push(current);
                self.free.push(current.0);
                stack.extend(node.children().iter().rev().copied());
            }
        }
        Ok(removed)
    }

    /// Rename `id` in place. Identity, parent link and payload are untouched.
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), OpError> {
        let parent = self.parent(id);
        if let Some(parent) = parent {
            if let Some(existing) = self.find_child(parent, new_name) {
                if existing != id {
                    return Err(OpError::NameCollision(new_name.to_string()));
                }
            }
        }
        match self.get_mut(id) {
            Some(node) => {
                node.name = new_name.to_string();
                Ok(())
            }
            None => Err(OpError::NotFound(format!("#{}", id.0))),
        }
    }

    /// Replace the content of a file node. Returns false for directories.
    pub fn set_content(&mut self, id: NodeId, content: &str) -> bool {
        match self.get_mut(id) {
            Some(Node {
                body: NodeBody::File(file),
                ..
            }) => {
                file.content = content.to_string();
                true
            }
            _ => false,
        }
    }

    /// Absolute path of `id`, derived from the parent chain. The root is `/`.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(node) = self.get(cur) else { break };
            if node.parent.is_none() {
                break;
            }
            names.push(node.name.as_str());
            current = node.parent;
        }
        if names.is_empty() {
            return "/".to_string();
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// True if `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.parent(cur);
        }
        false
    }

    /// Pre-order walk below `from` (exclusive), children in stored order.
    pub fn walk(&self, from: NodeId) -> Vec<TreeEntry> {
        let mut entries = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self
            .children(from)
            .iter()
            .rev()
            .map(|child| (*child, 0))
            .collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            entries.push(TreeEntry {
                path: self.path_of(id),
                kind: node.kind(),
                depth,
            });
            stack.extend(node.children().iter().rev().map(|child| (*child, depth + 1)));
        }
        entries
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for node in self.slots.iter().flatten() {
            match &node.body {
                NodeBody::Directory(_) if node.parent.is_some() => stats.directories += 1,
                NodeBody::Directory(_) => {}
                NodeBody::File(file) => {
                    stats.files += 1;
                    stats.content_bytes += file.content.len();
                }
            }
        }
        stats
    }
}
