//! Path resolution against a tree and a working directory.
//!
//! Only directories are resolution targets. The resolver never mutates the
//! tree and never moves the cursor.

use crate::tree::arena::Tree;
use crate::types::NodeId;

/// Resolve `path` to a directory.
///
/// * `None`, `""` and `"."` resolve to `cwd`.
/// * A leading `/` starts from the root, anything else from `cwd`.
/// * Empty and `.` segments are skipped; `..` climbs one level and is a
///   no-op at the root.
/// * Any other segment must name a child directory. A missing child or a
///   file yields `None` for the whole path.
pub fn resolve_directory(tree: &Tree, cwd: NodeId, path: Option<&str>) -> Option<NodeId> {
    let path = match path {
        None => return Some(cwd),
        Some(p) if p.is_empty() || p == "." => return Some(cwd),
        Some(p) => p,
    };

    let mut target = if path.starts_with('/') {
        tree.root()
    } else {
        cwd
    };

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if let Some(parent) = tree.parent(target) {
                    target = parent;
                }
            }
            name => {
                let child = tree.find_child(target, name)?;
                if !tree.is_dir(child) {
                    return None;
                }
                target = child;
            }
        }
    }
    Some(target)
}
