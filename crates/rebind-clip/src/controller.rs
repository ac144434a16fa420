//! Animator controller files
//!
//! A controller is a list of layers, each a list of states; a state may
//! play a clip. The file format:
//! ```toml
//! [controller]
//! name = "hero"
//!
//! [[layers]]
//! name = "Base Layer"
//!
//! [[layers.states]]
//! name = "Idle"
//! clip = "clips/idle.anim.toml"
//! ```

use crate::store::{ClipId, ClipStore};
use rebind_core::{RebindError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root structure of a `*.controller.toml` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerFile {
    pub controller: ControllerMetadata,
    #[serde(default)]
    pub layers: Vec<LayerDef>,
}

/// Controller metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerMetadata {
    pub name: String,
}

/// A layer's state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDef {
    pub name: String,
    #[serde(default)]
    pub states: Vec<StateDef>,
}

/// A state; states driven by something other than a clip leave `clip` unset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<String>,
}

/// A clip reference found while walking a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRef {
    pub layer: String,
    pub state: String,
    /// Clip file, resolved against the controller's directory
    pub clip: PathBuf,
}

impl ControllerFile {
    /// Clip references in layer order, then state order. States without a
    /// clip are skipped; repeated references are kept.
    pub fn clip_refs(&self, base_dir: &Path) -> Vec<ClipRef> {
        self.layers
            .iter()
            .flat_map(|layer| {
                layer.states.iter().filter_map(move |state| {
                    state.clip.as_ref().map(|clip| ClipRef {
                        layer: layer.name.clone(),
                        state: state.name.clone(),
                        clip: base_dir.join(clip),
                    })
                })
            })
            .collect()
    }
}

/// Load a controller from a `*.controller.toml` file
pub fn load_controller<P: AsRef<Path>>(path: P) -> Result<ControllerFile> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        RebindError::ControllerError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    toml::from_str(&content).map_err(|e| {
        RebindError::ControllerError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Load every clip reachable from a controller into `store`.
///
/// Returns clip ids in discovery order, each clip once at the position of
/// its first reference.
pub fn load_controller_clips<P: AsRef<Path>>(
    controller_path: P,
    store: &mut ClipStore,
) -> Result<Vec<ClipId>> {
    let controller_path = controller_path.as_ref();
    let controller = load_controller(controller_path)?;
    let base_dir = controller_path.parent().unwrap_or_else(|| Path::new("."));

    let mut ids = Vec::new();
    for clip_ref in controller.clip_refs(base_dir) {
        let id = store.load(&clip_ref.clip)?;
        if ids.contains(&id) {
            tracing::debug!(
                layer = %clip_ref.layer,
                state = %clip_ref.state,
                clip = %clip_ref.clip.display(),
                "clip already referenced by an earlier state"
            );
            continue;
        }
        ids.push(id);
    }

    tracing::debug!(
        controller = %controller.controller.name,
        clips = ids.len(),
        "enumerated controller clips"
    );
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: &str = r#"
[controller]
name = "hero"

[[layers]]
name = "Base Layer"

[[layers.states]]
name = "Idle"
clip = "clips/idle.anim.toml"

[[layers.states]]
name = "Locomotion"

[[layers.states]]
name = "Walk"
clip = "clips/walk.anim.toml"

[[layers]]
name = "Upper Body"

[[layers.states]]
name = "Wave"
clip = "clips/wave.anim.toml"

[[layers.states]]
name = "IdleAgain"
clip = "clips/idle.anim.toml"
"#;

    #[test]
    fn test_clip_refs_in_layer_then_state_order() {
        let controller: ControllerFile = toml::from_str(HERO).unwrap();
        let refs = controller.clip_refs(Path::new("assets"));
        let states: Vec<_> = refs.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["Idle", "Walk", "Wave", "IdleAgain"]);
        assert_eq!(refs[2].layer, "Upper Body");
        assert_eq!(refs[0].clip, Path::new("assets/clips/idle.anim.toml"));
    }

    #[test]
    fn test_empty_controller() {
        let controller: ControllerFile = toml::from_str("[controller]\nname = \"none\"\n").unwrap();
        assert!(controller.clip_refs(Path::new(".")).is_empty());
    }

    #[test]
    fn test_load_controller_clips_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let clips = dir.path().join("clips");
        fs::create_dir_all(&clips).unwrap();
        for name in ["idle", "walk", "wave"] {
            fs::write(
                clips.join(format!("{}.anim.toml", name)),
                format!("name = \"{}\"\n", name),
            )
            .unwrap();
        }
        let controller_path = dir.path().join("hero.controller.toml");
        fs::write(&controller_path, HERO).unwrap();

        let mut store = ClipStore::new();
        let ids = load_controller_clips(&controller_path, &mut store).unwrap();
        let names: Vec<_> = ids
            .iter()
            .map(|id| store.get(*id).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["idle", "walk", "wave"]);
    }

    #[test]
    fn test_missing_clip_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let controller_path = dir.path().join("hero.controller.toml");
        fs::write(&controller_path, HERO).unwrap();

        let mut store = ClipStore::new();
        let err = load_controller_clips(&controller_path, &mut store).unwrap_err();
        assert!(err.to_string().contains("idle.anim.toml"));
    }
}
