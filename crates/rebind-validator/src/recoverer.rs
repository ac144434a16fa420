//! Repairing lost bindings by unique leaf-name match

use crate::report::{ClipReport, FixState};
use rebind_clip::ClipStore;
use rebind_core::Result;
use rebind_hierarchy::PathEntry;
use std::collections::HashMap;

/// Outcome counts of a recovery pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoverySummary {
    pub fixed: usize,
    pub no_same_name: usize,
    pub duplicate: usize,
    /// Clip files written by the pass
    pub clips_written: usize,
}

impl RecoverySummary {
    fn add(&mut self, other: RecoverySummary) {
        self.fixed += other.fixed;
        self.no_same_name += other.no_same_name;
        self.duplicate += other.duplicate;
        self.clips_written += other.clips_written;
    }

    /// Bindings left unresolved
    pub fn unresolved(&self) -> usize {
        self.no_same_name + self.duplicate
    }
}

/// Matches lost bindings against the flattened hierarchy.
///
/// A binding is repaired only when exactly one candidate has its leaf name.
/// Nothing else about the path is considered.
pub struct Recoverer<'a> {
    by_name: HashMap<&'a str, Vec<&'a PathEntry>>,
}

impl<'a> Recoverer<'a> {
    /// Index candidates by object name
    pub fn new(candidates: &'a [PathEntry]) -> Self {
        let mut by_name: HashMap<&str, Vec<&PathEntry>> = HashMap::new();
        for entry in candidates {
            by_name.entry(entry.object_name.as_str()).or_default().push(entry);
        }
        Self { by_name }
    }

    /// Candidates whose object name equals `name`
    pub fn matches(&self, name: &str) -> &[&'a PathEntry] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Attempt to repair every unfixed binding of one clip.
    ///
    /// `progress` is called before each binding with its object name and
    /// `index / total`. Repaired paths are committed to the clip but not
    /// saved.
    pub fn recover(
        &self,
        report: &mut ClipReport,
        store: &mut ClipStore,
        mut progress: Option<&mut dyn FnMut(&str, f32)>,
    ) -> Result<RecoverySummary> {
        let mut summary = RecoverySummary::default();
        let total = report.bindings.len();

        for (i, binding) in report.bindings.iter_mut().enumerate() {
            if let Some(callback) = progress.as_deref_mut() {
                callback(&binding.object_name, i as f32 / total as f32);
            }
            if binding.state == FixState::Fixed {
                continue;
            }

            match self.matches(&binding.object_name) {
                [] => {
                    binding.state = FixState::ErrorNoSameName;
                    summary.no_same_name += 1;
                }
                [only] => {
                    store.set_path(binding.handle, &only.relative_path)?;
                    store.apply_modified_properties(binding.handle.clip)?;
                    tracing::info!(
                        clip = %report.clip_name,
                        from = %binding.path,
                        to = %only.relative_path,
                        "rewrote binding path"
                    );
                    binding.path = only.relative_path.clone();
                    binding.state = FixState::Fixed;
                    summary.fixed += 1;
                }
                several => {
                    tracing::warn!(
                        clip = %report.clip_name,
                        name = %binding.object_name,
                        candidates = several.len(),
                        "ambiguous object name, binding left unchanged"
                    );
                    binding.state = FixState::ErrorDuplicate;
                    summary.duplicate += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Recover every report in order without saving.
    ///
    /// `progress` is called before each clip with its name and
    /// `index / total`.
    pub fn recover_each(
        &self,
        reports: &mut [ClipReport],
        store: &mut ClipStore,
        mut progress: Option<&mut dyn FnMut(&str, f32)>,
    ) -> Result<RecoverySummary> {
        let mut summary = RecoverySummary::default();
        let total = reports.len();

        for (i, report) in reports.iter_mut().enumerate() {
            if let Some(callback) = progress.as_deref_mut() {
                callback(&report.clip_name, i as f32 / total as f32);
            }
            summary.add(self.recover(report, store, None)?);
        }

        Ok(summary)
    }

    /// Recover every report, then save all modified clips once
    pub fn recover_all(
        &self,
        reports: &mut [ClipReport],
        store: &mut ClipStore,
        progress: Option<&mut dyn FnMut(&str, f32)>,
    ) -> Result<RecoverySummary> {
        let mut summary = self.recover_each(reports, store, progress)?;
        summary.clips_written = store.save_assets()?;
        Ok(summary)
    }
}
