//! Hierarchy loading from TOML files

use crate::format::{HierarchyFile, NodeDef};
use crate::node::{Animator, Hierarchy, NodeId};
use rebind_core::{RebindError, Result, PATH_SEPARATOR};
use std::fs;
use std::path::Path;

/// Load a hierarchy from a `*.hierarchy.toml` file.
///
/// Controller paths are resolved against the file's directory.
pub fn load_hierarchy<P: AsRef<Path>>(path: P) -> Result<Hierarchy> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        RebindError::HierarchyError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    load_hierarchy_str(&content, base_dir)
}

/// Load a hierarchy from a TOML string
pub fn load_hierarchy_str(content: &str, base_dir: &Path) -> Result<Hierarchy> {
    let file: HierarchyFile = toml::from_str(content)?;
    let mut hierarchy = Hierarchy::new(file.root.name.clone())?;
    let root = hierarchy.root();
    attach_animator(&mut hierarchy, root, &file.root, base_dir)?;

    // Depth-first with an explicit stack; children are pushed in reverse so
    // sibling order is preserved.
    let mut pending: Vec<(NodeId, &NodeDef)> =
        file.root.children.iter().rev().map(|c| (root, c)).collect();

    while let Some((parent, def)) = pending.pop() {
        if def.name.contains(PATH_SEPARATOR) {
            tracing::warn!(name = %def.name, "node name contains '/', paths through it cannot resolve");
        }
        let id = hierarchy.add_child(parent, def.name.clone())?;
        attach_animator(&mut hierarchy, id, def, base_dir)?;
        pending.extend(def.children.iter().rev().map(|c| (id, c)));
    }

    tracing::debug!(
        root = %file.root.name,
        nodes = hierarchy.node_count(),
        "loaded hierarchy"
    );
    Ok(hierarchy)
}

fn attach_animator(
    hierarchy: &mut Hierarchy,
    id: NodeId,
    def: &NodeDef,
    base_dir: &Path,
) -> Result<()> {
    if let Some(animator) = &def.animator {
        let controller = animator.controller.as_ref().map(|c| base_dir.join(c));
        hierarchy.set_animator(id, Animator { controller })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use std::io::Write;

    const HERO: &str = r#"
[root]
name = "Hero"

[root.animator]
controller = "hero.controller.toml"

[[root.children]]
name = "Arm"

[[root.children.children]]
name = "Hand"

[[root.children]]
name = "Leg"

[root.children.animator]
"#;

    #[test]
    fn test_load_hierarchy_str() {
        let h = load_hierarchy_str(HERO, Path::new("project")).unwrap();
        assert_eq!(h.node_count(), 4);
        assert_eq!(h.name(h.root()), Some("Hero"));

        let hand = h.select("Arm/Hand").unwrap();
        assert_eq!(h.name(hand), Some("Hand"));

        let animator = h.get(h.root()).unwrap().animator().unwrap();
        assert_eq!(
            animator.controller.as_deref(),
            Some(Path::new("project/hero.controller.toml"))
        );
    }

    #[test]
    fn test_animator_without_controller() {
        let h = load_hierarchy_str(HERO, Path::new(".")).unwrap();
        let leg = h.select("Leg").unwrap();
        let animator = h.get(leg).unwrap().animator().unwrap();
        assert!(animator.controller.is_none());
        assert!(h.get(h.select("Arm").unwrap()).unwrap().animator().is_none());
    }

    #[test]
    fn test_sibling_order_preserved() {
        let h = load_hierarchy_str(HERO, Path::new(".")).unwrap();
        let paths: Vec<_> = flatten(&h, h.root())
            .unwrap()
            .into_iter()
            .map(|e| e.relative_path)
            .collect();
        assert_eq!(paths, vec!["Arm", "Arm/Hand", "Leg"]);
    }

    #[test]
    fn test_reject_empty_name() {
        let toml_str = r#"
[root]
name = "Hero"

[[root.children]]
name = ""
"#;
        assert!(load_hierarchy_str(toml_str, Path::new(".")).is_err());
    }

    #[test]
    fn test_load_hierarchy_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.hierarchy.toml");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(HERO.as_bytes()).unwrap();

        let h = load_hierarchy(&path).unwrap();
        let animator = h.get(h.root()).unwrap().animator().unwrap();
        assert_eq!(
            animator.controller.as_deref(),
            Some(dir.path().join("hero.controller.toml").as_path())
        );
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_hierarchy("does/not/exist.hierarchy.toml").unwrap_err();
        assert!(err.to_string().contains("exist.hierarchy.toml"));
    }
}
