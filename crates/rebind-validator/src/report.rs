//! Validation report types

use rebind_clip::{BindingHandle, ClipId};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Repair state of a binding.
///
/// `None → Lost → {ErrorNoSameName | ErrorDuplicate | Fixed}`, decided once
/// per recovery pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixState {
    #[default]
    None,
    /// Path does not resolve; not yet recovered
    Lost,
    /// No object under the selection has the binding's leaf name
    ErrorNoSameName,
    /// Several objects share the leaf name, so the target is ambiguous
    ErrorDuplicate,
    /// Path was rewritten to the single same-named object
    Fixed,
}

impl FixState {
    pub fn is_error(self) -> bool {
        matches!(self, FixState::ErrorNoSameName | FixState::ErrorDuplicate)
    }

    /// Human-readable outcome, empty for states with nothing to say
    pub fn detail(self) -> &'static str {
        match self {
            FixState::ErrorDuplicate => "multiple objects with the same name exist under the selection",
            FixState::ErrorNoSameName => "no object with the same name was found",
            FixState::Fixed => "animation path was changed",
            FixState::None | FixState::Lost => "",
        }
    }
}

impl fmt::Display for FixState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FixState::None => "none",
            FixState::Lost => "lost",
            FixState::ErrorNoSameName => "error_no_same_name",
            FixState::ErrorDuplicate => "error_duplicate",
            FixState::Fixed => "fixed",
        };
        f.pad(s)
    }
}

/// A curve binding whose path did not resolve
#[derive(Debug, Clone)]
pub struct LostBinding {
    /// Leaf name of `path`, used to find candidates
    pub object_name: String,
    /// Stored path; replaced by the repaired path once fixed
    pub path: String,
    pub attribute: String,
    pub state: FixState,
    /// Location of the path in clip storage
    pub handle: BindingHandle,
}

/// Lost bindings of one clip
#[derive(Debug, Clone)]
pub struct ClipReport {
    pub clip: ClipId,
    pub clip_name: String,
    pub source: Option<PathBuf>,
    pub bindings: Vec<LostBinding>,
}

impl ClipReport {
    /// True when nothing is lost or every lost binding has been fixed
    pub fn has_no_error(&self) -> bool {
        self.bindings.is_empty() || self.bindings.iter().all(|b| b.state == FixState::Fixed)
    }

    /// Count bindings in a given state
    pub fn count(&self, state: FixState) -> usize {
        self.bindings.iter().filter(|b| b.state == state).count()
    }
}
