//! Hierarchy - an arena of named nodes with parent links

use rebind_core::path::segments;
use rebind_core::{RebindError, Result};
use std::fmt;
use std::path::PathBuf;

/// Index of a node inside its `Hierarchy`
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NodeId(usize);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Animator attached to a node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animator {
    /// Controller file driving this animator, if one is assigned
    pub controller: Option<PathBuf>,
}

/// A single object in the hierarchy
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    animator: Option<Animator>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, `None` for the hierarchy root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in sibling order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn animator(&self) -> Option<&Animator> {
        self.animator.as_ref()
    }
}

/// A rooted tree of named objects.
///
/// Nodes live in an arena and refer to each other by `NodeId`. The parent
/// link is a plain index, so walking upward never borrows the child.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<Node>,
}

impl Hierarchy {
    /// Create a hierarchy containing only a root node
    pub fn new(root_name: impl Into<String>) -> Result<Self> {
        let name = checked_name(root_name.into())?;
        Ok(Self {
            nodes: vec![Node {
                name,
                parent: None,
                children: Vec::new(),
                animator: None,
            }],
        })
    }

    /// The root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Name of a node
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::name)
    }

    /// Children of a node (empty for unknown ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Append a new child under `parent`
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId> {
        let name = checked_name(name.into())?;
        self.require(parent)?;

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            parent: Some(parent),
            children: Vec::new(),
            animator: None,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Rename a node
    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        let name = checked_name(name.into())?;
        self.require(id)?;
        self.nodes[id.0].name = name;
        Ok(())
    }

    /// Move a node (with its subtree) to the end of `new_parent`'s children
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> Result<()> {
        self.require(id)?;
        self.require(new_parent)?;
        if id == self.root() {
            return Err(RebindError::HierarchyError(
                "the root node cannot be reparented".to_string(),
            ));
        }
        if self.is_ancestor_or_self(id, new_parent) {
            return Err(RebindError::HierarchyError(format!(
                "cannot move '{}' under its own descendant '{}'",
                self.nodes[id.0].name, self.nodes[new_parent.0].name
            )));
        }

        if let Some(old_parent) = self.nodes[id.0].parent {
            self.nodes[old_parent.0].children.retain(|c| *c != id);
        }
        self.nodes[id.0].parent = Some(new_parent);
        self.nodes[new_parent.0].children.push(id);
        Ok(())
    }

    /// Attach or replace the animator on a node
    pub fn set_animator(&mut self, id: NodeId, animator: Animator) -> Result<()> {
        self.require(id)?;
        self.nodes[id.0].animator = Some(animator);
        Ok(())
    }

    /// Resolve a root-relative path by successive child-name lookups.
    ///
    /// The first segment names a direct child of `from`; at each step the
    /// first child with a matching name is taken. The empty path resolves to
    /// `from` itself.
    pub fn find(&self, from: NodeId, path: &str) -> Option<NodeId> {
        let mut current = from;
        self.get(current)?;
        for segment in segments(path) {
            current = *self
                .children(current)
                .iter()
                .find(|child| self.nodes[child.0].name == segment)?;
        }
        Some(current)
    }

    /// Resolve a selection path below the hierarchy root
    pub fn select(&self, path: &str) -> Result<NodeId> {
        self.find(self.root(), path)
            .ok_or_else(|| RebindError::NodeNotFound(path.to_string()))
    }

    /// Whether `ancestor` is `id` or lies on the parent chain above it
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn require(&self, id: NodeId) -> Result<()> {
        if self.get(id).is_none() {
            return Err(RebindError::NodeNotFound(id.to_string()));
        }
        Ok(())
    }
}

fn checked_name(name: String) -> Result<String> {
    if name.is_empty() {
        return Err(RebindError::HierarchyError(
            "node names must not be empty".to_string(),
        ));
    }
    Ok(name)
}
