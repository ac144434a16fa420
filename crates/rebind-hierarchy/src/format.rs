//! Hierarchy file format definitions

use serde::{Deserialize, Serialize};

/// Root structure of a `*.hierarchy.toml` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyFile {
    pub root: NodeDef,
}

/// A node and its subtree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    pub name: String,
    /// Animator attached to this node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animator: Option<AnimatorDef>,
    /// Children in sibling order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDef>,
}

/// Animator attachment; the controller may be left unassigned
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimatorDef {
    /// Controller file, relative to the hierarchy file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
}

impl NodeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            animator: None,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: NodeDef) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.animator = Some(AnimatorDef {
            controller: Some(controller.into()),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_file_deserialization() {
        let toml_str = r#"
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
"#;

        let file: HierarchyFile = toml::from_str(toml_str).unwrap();
        assert_eq!(file.root.name, "Hero");
        assert_eq!(
            file.root.animator.unwrap().controller.as_deref(),
            Some("hero.controller.toml")
        );
        assert_eq!(file.root.children.len(), 2);
        assert_eq!(file.root.children[0].children[0].name, "Hand");
    }

    #[test]
    fn test_hierarchy_file_serialization() {
        let file = HierarchyFile {
            root: NodeDef::new("Hero")
                .with_controller("hero.controller.toml")
                .with_child(NodeDef::new("Arm").with_child(NodeDef::new("Hand"))),
        };

        let toml_str = toml::to_string_pretty(&file).unwrap();
        assert!(toml_str.contains("Hero"));
        assert!(toml_str.contains("Hand"));

        let back: HierarchyFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.root.children[0].children[0].name, "Hand");
    }
}
