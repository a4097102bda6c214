//! fssim: In-Memory File System Simulator
//!
//! A hierarchical tree of directories and text files held in memory, with a
//! working-directory cursor, an append-only operation journal, and whole-tree
//! JSON snapshots.

pub mod config;
pub mod error;
pub mod journal;
pub mod logging;
pub mod simulator;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::{ApiError, OpError, StorageError};
pub use simulator::Simulator;
pub use types::{ChildEntry, CopyOutcome, NodeId, NodeKind, TreeEntry, TreeStats};
