//! CLI command implementations

pub mod check;
pub mod fix;
pub mod flatten;
pub mod init;
mod output;

use anyhow::{Context, Result};
use rebind_hierarchy::{load_hierarchy, Hierarchy, NodeId};

/// Load a hierarchy file and resolve the selected node.
///
/// Without `--select` the hierarchy root is selected. A selection path that
/// names no object leaves nothing selected.
pub fn load_selection(hierarchy: &str, select: Option<&str>) -> Result<(Hierarchy, Option<NodeId>)> {
    let loaded = load_hierarchy(hierarchy)
        .with_context(|| format!("failed to load hierarchy '{}'", hierarchy))?;
    let selection = match select {
        Some(path) => {
            let found = loaded.find(loaded.root(), path);
            if found.is_none() {
                tracing::warn!(select = %path, "selection path names no object");
            }
            found
        }
        None => Some(loaded.root()),
    };
    Ok((loaded, selection))
}
