//! ClipStore - the set of clip documents open for one session

use crate::category::CurveCategory;
use crate::document::ClipDocument;
use rebind_core::{RebindError, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Index of a clip inside its `ClipStore`
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ClipId(usize);

impl fmt::Debug for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClipId({})", self.0)
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clip#{}", self.0)
    }
}

/// Where a binding's `path` lives, so a repaired value can be written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingHandle {
    pub clip: ClipId,
    pub category: CurveCategory,
    pub index: usize,
}

/// A loaded clip and its bookkeeping
pub struct ClipAsset {
    name: String,
    source: Option<PathBuf>,
    document: ClipDocument,
    modified: bool,
}

impl ClipAsset {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing file, `None` for clips created in memory
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn document(&self) -> &ClipDocument {
        &self.document
    }

    /// Whether committed edits have not been saved yet
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

/// Open clip documents, addressed by `ClipId`.
///
/// A file is loaded at most once; loading the same path again returns the
/// existing id.
#[derive(Default)]
pub struct ClipStore {
    assets: Vec<ClipAsset>,
    by_path: HashMap<PathBuf, ClipId>,
}

impl ClipStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a clip from a `*.anim.toml` file
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<ClipId> {
        let path = path.as_ref().to_path_buf();
        let key = fs::canonicalize(&path).map_err(|e| {
            RebindError::ClipError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        if let Some(id) = self.by_path.get(&key) {
            return Ok(*id);
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            RebindError::ClipError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let document = ClipDocument::from_str(&content).map_err(|e| {
            RebindError::ClipError(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        let name = document
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| clip_stem(&path));

        let id = self.push(name, Some(path), document);
        self.by_path.insert(key, id);
        Ok(id)
    }

    /// Add a clip that has no backing file
    pub fn insert_str(&mut self, name: impl Into<String>, content: &str) -> Result<ClipId> {
        let document = ClipDocument::from_str(content)?;
        let name = document
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| name.into());
        Ok(self.push(name, None, document))
    }

    fn push(&mut self, name: String, source: Option<PathBuf>, document: ClipDocument) -> ClipId {
        let id = ClipId(self.assets.len());
        tracing::debug!(clip = %name, %id, "opened clip");
        self.assets.push(ClipAsset {
            name,
            source,
            document,
            modified: false,
        });
        id
    }

    pub fn get(&self, id: ClipId) -> Option<&ClipAsset> {
        self.assets.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Committed `path` at a handle
    pub fn path_at(&self, handle: BindingHandle) -> Option<&str> {
        self.get(handle.clip)?
            .document
            .path_at(handle.category, handle.index)
    }

    /// Stage a new `path` at a handle
    pub fn set_path(&mut self, handle: BindingHandle, path: &str) -> Result<()> {
        self.asset_mut(handle.clip)?
            .document
            .set_path(handle.category, handle.index, path)
    }

    /// Commit a clip's staged writes and mark it modified if any were applied
    pub fn apply_modified_properties(&mut self, clip: ClipId) -> Result<usize> {
        let asset = self.asset_mut(clip)?;
        let applied = asset.document.apply_modified_properties()?;
        if applied > 0 {
            asset.modified = true;
        }
        Ok(applied)
    }

    /// Write one modified clip back to its file.
    ///
    /// Returns whether the file was written. Clips whose text is unchanged
    /// since loading, or that have no backing file, are only unmarked.
    pub fn save_clip(&mut self, clip: ClipId) -> Result<bool> {
        let asset = self.asset_mut(clip)?;
        if !asset.modified {
            return Ok(false);
        }

        let Some(source) = asset.source.as_ref() else {
            tracing::debug!(clip = %asset.name, "clip has no backing file, nothing to save");
            asset.modified = false;
            return Ok(false);
        };
        if asset.document.is_unchanged() {
            tracing::debug!(clip = %asset.name, "clip text unchanged, skipping write");
            asset.modified = false;
            return Ok(false);
        }

        fs::write(source, asset.document.to_string()).map_err(|e| {
            RebindError::ClipError(format!("Failed to write {}: {}", source.display(), e))
        })?;
        asset.document.mark_saved();
        asset.modified = false;
        tracing::info!(clip = %asset.name, file = %source.display(), "saved clip");
        Ok(true)
    }

    /// Write every modified clip, returning how many files were written
    pub fn save_assets(&mut self) -> Result<usize> {
        let mut written = 0;
        for index in 0..self.assets.len() {
            if self.save_clip(ClipId(index))? {
                written += 1;
            }
        }
        Ok(written)
    }

    fn asset_mut(&mut self, id: ClipId) -> Result<&mut ClipAsset> {
        self.assets
            .get_mut(id.0)
            .ok_or_else(|| RebindError::ClipNotFound(id.to_string()))
    }
}

/// File name without the `.anim.toml` (or plain extension) suffix
fn clip_stem(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    file_name
        .strip_suffix(".anim.toml")
        .or_else(|| path.file_stem().and_then(|s| s.to_str()))
        .unwrap_or(file_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: &str = r#"name = "idle"

[[position_curves]]
path = "Arm/Hand"

[[float_curves]]
path = "Arm"
attribute = "m_IsActive"
"#;

    fn handle(clip: ClipId, category: CurveCategory, index: usize) -> BindingHandle {
        BindingHandle {
            clip,
            category,
            index,
        }
    }

    #[test]
    fn test_insert_and_patch_in_memory() {
        let mut store = ClipStore::new();
        let id = store.insert_str("fallback", IDLE).unwrap();
        assert_eq!(store.get(id).unwrap().name(), "idle");

        let h = handle(id, CurveCategory::Position, 0);
        store.set_path(h, "Leg/Hand").unwrap();
        assert_eq!(store.path_at(h), Some("Arm/Hand"));
        assert!(!store.get(id).unwrap().is_modified());

        assert_eq!(store.apply_modified_properties(id).unwrap(), 1);
        assert_eq!(store.path_at(h), Some("Leg/Hand"));
        assert!(store.get(id).unwrap().is_modified());

        // No backing file: saving only clears the flag
        assert_eq!(store.save_assets().unwrap(), 0);
        assert!(!store.get(id).unwrap().is_modified());
    }

    #[test]
    fn test_apply_without_pending_does_not_mark_modified() {
        let mut store = ClipStore::new();
        let id = store.insert_str("idle", IDLE).unwrap();
        assert_eq!(store.apply_modified_properties(id).unwrap(), 0);
        assert!(!store.get(id).unwrap().is_modified());
    }

    #[test]
    fn test_load_deduplicates_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idle.anim.toml");
        fs::write(&path, IDLE).unwrap();

        let mut store = ClipStore::new();
        let a = store.load(&path).unwrap();
        let b = store.load(&path).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_writes_only_modified_files() {
        let dir = tempfile::tempdir().unwrap();
        let idle_path = dir.path().join("idle.anim.toml");
        let run_path = dir.path().join("run.anim.toml");
        fs::write(&idle_path, IDLE).unwrap();
        fs::write(&run_path, "[[scale_curves]]\npath = \"Leg\"\n").unwrap();

        let mut store = ClipStore::new();
        let idle = store.load(&idle_path).unwrap();
        let run = store.load(&run_path).unwrap();
        assert_eq!(store.get(run).unwrap().name(), "run");

        store
            .set_path(handle(idle, CurveCategory::Float, 0), "Body/Arm")
            .unwrap();
        store.apply_modified_properties(idle).unwrap();

        assert_eq!(store.save_assets().unwrap(), 1);
        let saved = fs::read_to_string(&idle_path).unwrap();
        assert!(saved.contains("path = \"Body/Arm\""));
        assert!(saved.contains("path = \"Arm/Hand\""));
        assert_eq!(
            fs::read_to_string(&run_path).unwrap(),
            "[[scale_curves]]\npath = \"Leg\"\n"
        );

        // Nothing left to write
        assert_eq!(store.save_assets().unwrap(), 0);
    }

    #[test]
    fn test_load_normalizes_paths() {
        let dir = tempfile::tempdir().unwrap();
        let clips = dir.path().join("clips");
        fs::create_dir_all(&clips).unwrap();
        fs::write(clips.join("idle.anim.toml"), IDLE).unwrap();

        let mut store = ClipStore::new();
        let a = store.load(clips.join("idle.anim.toml")).unwrap();
        let b = store.load(clips.join("../clips/idle.anim.toml")).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_clip_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idle.anim.toml");
        fs::write(&path, IDLE).unwrap();

        let mut store = ClipStore::new();
        let id = store.load(&path).unwrap();
        store
            .set_path(handle(id, CurveCategory::Position, 0), "Leg/Hand")
            .unwrap();
        store.apply_modified_properties(id).unwrap();

        // A directory in place of the file makes the write fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        assert!(store.save_clip(id).is_err());
        assert!(store.get(id).unwrap().is_modified());

        fs::remove_dir(&path).unwrap();
        assert_eq!(store.save_assets().unwrap(), 1);
        assert!(!store.get(id).unwrap().is_modified());
        assert!(fs::read_to_string(&path).unwrap().contains("path = \"Leg/Hand\""));
    }

    #[test]
    fn test_save_skips_identical_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idle.anim.toml");
        fs::write(&path, IDLE).unwrap();

        let mut store = ClipStore::new();
        let id = store.load(&path).unwrap();
        store
            .set_path(handle(id, CurveCategory::Position, 0), "Arm/Hand")
            .unwrap();
        store.apply_modified_properties(id).unwrap();
        assert!(!store.save_clip(id).unwrap());
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.anim.toml");
        fs::write(&path, "[[position_curves]\n").unwrap();

        let mut store = ClipStore::new();
        let err = store.load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.anim.toml"));
    }

    #[test]
    fn test_clip_stem() {
        assert_eq!(clip_stem(Path::new("clips/walk.anim.toml")), "walk");
        assert_eq!(clip_stem(Path::new("clips/walk.toml")), "walk");
    }
}
