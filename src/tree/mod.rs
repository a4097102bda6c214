//! Directory tree model
//!
//! The arena owning all nodes, the node types, path resolution, and naming rules.

pub mod arena;
pub mod naming;
pub mod node;
pub mod resolver;

pub use arena::{Tree, ROOT_NAME};
pub use node::{DirectoryNode, FileNode, Node, NodeBody};
pub use resolver::resolve_directory;
