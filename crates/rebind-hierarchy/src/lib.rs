//! Rebind Hierarchy - the object tree animation paths are resolved against
//!
//! Hierarchies are loaded from nested `*.hierarchy.toml` files into an arena
//! of named nodes. Names are not unique; paths are resolved by walking
//! child names from a chosen root.

mod flatten;
mod format;
mod loader;
mod node;

pub use flatten::{collect_descendants, flatten, relative_path, PathEntry};
pub use format::{AnimatorDef, HierarchyFile, NodeDef};
pub use loader::{load_hierarchy, load_hierarchy_str};
pub use node::{Animator, Hierarchy, Node, NodeId};
