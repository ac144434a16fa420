//! Flattening a hierarchy into (name, relative path) records

use crate::node::{Hierarchy, NodeId};
use rebind_core::path::join;
use rebind_core::{RebindError, Result};
use serde::Serialize;

/// A descendant of the root, flattened for name lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    /// The node's own name (the path's leaf)
    pub object_name: String,
    /// Path from the root to the node, root excluded
    pub relative_path: String,
}

/// Collect every descendant of `root` in depth-first pre-order.
pub fn collect_descendants(hierarchy: &Hierarchy, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    push_children(hierarchy, root, &mut out);
    out
}

fn push_children(hierarchy: &Hierarchy, node: NodeId, out: &mut Vec<NodeId>) {
    let children = hierarchy.children(node);
    if children.is_empty() {
        return;
    }
    for &child in children {
        out.push(child);
        push_children(hierarchy, child, out);
    }
}

/// Flatten every descendant of `root` into a `PathEntry`, pre-order.
pub fn flatten(hierarchy: &Hierarchy, root: NodeId) -> Result<Vec<PathEntry>> {
    let entries = collect_descendants(hierarchy, root)
        .into_iter()
        .map(|id| {
            let relative_path = relative_path(hierarchy, id, root)?;
            let object_name = hierarchy.name(id).unwrap_or_default().to_string();
            Ok(PathEntry {
                object_name,
                relative_path,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        root = hierarchy.name(root).unwrap_or_default(),
        count = entries.len(),
        "flattened hierarchy"
    );
    Ok(entries)
}

/// Path of `node` relative to `root`, root excluded.
///
/// Walks parent links upward; a node whose chain ends before reaching
/// `root` is reported as detached.
pub fn relative_path(hierarchy: &Hierarchy, node: NodeId, root: NodeId) -> Result<String> {
    let mut names = Vec::new();
    let mut current = node;

    while current != root {
        let entry = hierarchy
            .get(current)
            .ok_or_else(|| RebindError::NodeNotFound(current.to_string()))?;
        names.push(entry.name());

        match entry.parent() {
            Some(parent) => current = parent,
            None => {
                let node_name = hierarchy.name(node).unwrap_or_default().to_string();
                let root_name = hierarchy.name(root).unwrap_or_default().to_string();
                tracing::error!(node = %node_name, root = %root_name, "node is outside the selected root");
                return Err(RebindError::DetachedNode {
                    node: node_name,
                    root: root_name,
                });
            }
        }
    }

    names.reverse();
    Ok(join(names))
}
