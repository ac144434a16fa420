//! Rebind Clip - animation clip storage
//!
//! Clips are `*.anim.toml` documents holding six curve arrays. Each curve
//! element names its target object by a root-relative `path`. Documents are
//! edited with `toml_edit` so a rewritten path leaves every other byte of
//! the file alone.
//!
//! Controllers (`*.controller.toml`) list the clips reachable from an
//! animator, layer by layer and state by state.

mod category;
mod controller;
mod document;
mod store;

pub use category::CurveCategory;
pub use controller::{
    load_controller, load_controller_clips, ClipRef, ControllerFile, ControllerMetadata, LayerDef,
    StateDef,
};
pub use document::{ClipDocument, CurveBinding};
pub use store::{BindingHandle, ClipAsset, ClipId, ClipStore};
