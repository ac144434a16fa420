//! ValidationSession - validation results kept open for repair

use crate::recoverer::{Recoverer, RecoverySummary};
use crate::report::ClipReport;
use crate::validator::Validator;
use rebind_clip::{load_controller_clips, ClipId, ClipStore};
use rebind_core::{RebindError, Result};
use rebind_hierarchy::{flatten, Hierarchy, NodeId};

/// Validation results for one selected object.
///
/// Opened from a selection, it owns the loaded clips and their reports
/// until closed. Each recovery flattens the hierarchy afresh, so edits to
/// the hierarchy between calls are picked up.
pub struct ValidationSession<'a> {
    hierarchy: &'a Hierarchy,
    selection: NodeId,
    store: ClipStore,
    clips: Vec<ClipId>,
    reports: Vec<ClipReport>,
    persist: bool,
}

impl<'a> ValidationSession<'a> {
    /// Open a session for the selected node.
    ///
    /// The selection must carry an animator with a controller; the
    /// controller's clips are loaded and validated immediately.
    pub fn open(hierarchy: &'a Hierarchy, selection: Option<NodeId>) -> Result<Self> {
        let selection = selection.ok_or(RebindError::NoSelection)?;
        let node = hierarchy
            .get(selection)
            .ok_or_else(|| RebindError::NodeNotFound(selection.to_string()))?;
        let animator = node
            .animator()
            .ok_or_else(|| RebindError::MissingAnimator(node.name().to_string()))?;
        let controller = animator
            .controller
            .as_ref()
            .ok_or_else(|| RebindError::MissingController(node.name().to_string()))?;

        let mut store = ClipStore::new();
        let clips = load_controller_clips(controller, &mut store)?;
        Self::from_store(hierarchy, selection, store, clips)
    }

    /// Open a session over clips that are already loaded
    pub fn from_store(
        hierarchy: &'a Hierarchy,
        selection: NodeId,
        store: ClipStore,
        clips: Vec<ClipId>,
    ) -> Result<Self> {
        let mut session = Self {
            hierarchy,
            selection,
            store,
            clips,
            reports: Vec::new(),
            persist: true,
        };
        session.revalidate()?;
        Ok(session)
    }

    /// Whether recovery saves repaired clips (default `true`)
    pub fn set_persist(&mut self, persist: bool) {
        self.persist = persist;
    }

    pub fn selection(&self) -> NodeId {
        self.selection
    }

    pub fn reports(&self) -> &[ClipReport] {
        &self.reports
    }

    pub fn store(&self) -> &ClipStore {
        &self.store
    }

    /// True when every report is free of unfixed bindings
    pub fn has_no_error(&self) -> bool {
        self.reports.iter().all(ClipReport::has_no_error)
    }

    /// Index of the first report for a clip name
    pub fn find_report(&self, clip_name: &str) -> Option<usize> {
        self.reports.iter().position(|r| r.clip_name == clip_name)
    }

    /// Rebuild all reports from the current hierarchy and clip contents
    pub fn revalidate(&mut self) -> Result<()> {
        let validator = Validator::new(self.hierarchy, self.selection);
        self.reports = validator.validate(&self.store, &self.clips)?;

        let lost: usize = self.reports.iter().map(|r| r.bindings.len()).sum();
        tracing::debug!(clips = self.reports.len(), lost, "validated clips");
        Ok(())
    }

    /// Recover one clip's report, saving that clip if persisting
    pub fn recover_clip(
        &mut self,
        index: usize,
        progress: Option<&mut dyn FnMut(&str, f32)>,
    ) -> Result<RecoverySummary> {
        let candidates = flatten(self.hierarchy, self.selection)?;
        let recoverer = Recoverer::new(&candidates);

        let report = self
            .reports
            .get_mut(index)
            .ok_or_else(|| RebindError::ClipNotFound(format!("report {}", index)))?;
        let mut summary = recoverer.recover(report, &mut self.store, progress)?;

        if self.persist && self.store.save_clip(report.clip)? {
            summary.clips_written = 1;
        }
        Ok(summary)
    }

    /// Recover every report, saving once at the end if persisting
    pub fn recover_all(
        &mut self,
        progress: Option<&mut dyn FnMut(&str, f32)>,
    ) -> Result<RecoverySummary> {
        let candidates = flatten(self.hierarchy, self.selection)?;
        let recoverer = Recoverer::new(&candidates);

        if self.persist {
            recoverer.recover_all(&mut self.reports, &mut self.store, progress)
        } else {
            recoverer.recover_each(&mut self.reports, &mut self.store, progress)
        }
    }

    /// End the session, releasing its reports and clips
    pub fn close(self) {
        tracing::debug!(clips = self.clips.len(), "closed validation session");
    }
}
