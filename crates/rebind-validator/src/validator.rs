//! Finding bindings whose path no longer resolves

use crate::report::{ClipReport, FixState, LostBinding};
use rebind_clip::{BindingHandle, ClipId, ClipStore};
use rebind_core::{object_name, RebindError, Result};
use rebind_hierarchy::{Hierarchy, NodeId};

/// Checks clip bindings against the hierarchy below a root node
pub struct Validator<'a> {
    hierarchy: &'a Hierarchy,
    root: NodeId,
}

impl<'a> Validator<'a> {
    /// Create a validator resolving paths from `root`
    pub fn new(hierarchy: &'a Hierarchy, root: NodeId) -> Self {
        Self { hierarchy, root }
    }

    /// Whether a stored path names an existing object below the root
    pub fn resolves(&self, path: &str) -> bool {
        self.hierarchy.find(self.root, path).is_some()
    }

    /// Validate clips in order, producing one report per clip
    pub fn validate(&self, store: &ClipStore, clips: &[ClipId]) -> Result<Vec<ClipReport>> {
        clips
            .iter()
            .map(|clip| self.validate_clip(store, *clip))
            .collect()
    }

    /// Collect the lost bindings of a single clip
    pub fn validate_clip(&self, store: &ClipStore, clip: ClipId) -> Result<ClipReport> {
        let asset = store
            .get(clip)
            .ok_or_else(|| RebindError::ClipNotFound(clip.to_string()))?;

        let mut bindings = Vec::new();
        for binding in asset.document().bindings()? {
            if self.resolves(&binding.path) {
                continue;
            }
            tracing::debug!(
                clip = %asset.name(),
                category = %binding.category,
                path = %binding.path,
                attribute = %binding.attribute,
                "binding is lost"
            );
            bindings.push(LostBinding {
                object_name: object_name(&binding.path).to_string(),
                path: binding.path,
                attribute: binding.attribute,
                state: FixState::Lost,
                handle: BindingHandle {
                    clip,
                    category: binding.category,
                    index: binding.index,
                },
            });
        }

        Ok(ClipReport {
            clip,
            clip_name: asset.name().to_string(),
            source: asset.source().map(|p| p.to_path_buf()),
            bindings,
        })
    }
}
