//! Filesystem node types

use crate::types::{NodeId, NodeKind};

/// File node representation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileNode {
    pub content: String,
}

/// Directory node representation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    pub children: Vec<NodeId>, // owned, in insertion order
}

/// Variant payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    File(FileNode),
    Directory(DirectoryNode),
}

impl NodeBody {
    pub fn empty_directory() -> Self {
        NodeBody::Directory(DirectoryNode::default())
    }

    pub fn file(content: impl Into<String>) -> Self {
        NodeBody::File(FileNode {
            content: content.into(),
        })
    }
}

/// A named entry in the tree
///
/// `parent` is a plain index back into the arena. It is used for path
/// reconstruction and upward navigation only; ownership runs strictly from
/// a directory's `children` downward.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) body: NodeBody,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::File(_) => NodeKind::File,
            NodeBody::Directory(_) => NodeKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.body, NodeBody::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self.body, NodeBody::File(_))
    }

    /// Child ids; empty for files.
    pub fn children(&self) -> &[NodeId] {
        match &self.body {
            NodeBody::Directory(dir) => &dir.children,
            NodeBody::File(_) => &[],
        }
    }

    /// File content; `None` for directories.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            NodeBody::File(file) => Some(&file.content),
            NodeBody::Directory(_) => None,
        }
    }
}
