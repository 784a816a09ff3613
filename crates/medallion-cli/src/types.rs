use std::path::PathBuf;

use medallion_cli::export::ExportedFile;
use medallion_model::{CommitMode, KeyStrategy, QualityReport};
use medallion_warehouse::ReloadOutcome;

#[derive(Debug)]
pub struct ReloadSummary {
    pub source_dir: PathBuf,
    pub commit_mode: CommitMode,
    pub key_strategy: KeyStrategy,
    pub outcome: ReloadOutcome,
    /// Gold view name and row count; empty when the reload failed.
    pub views: Vec<ViewSummary>,
    pub exported: Vec<ExportedFile>,
    pub key_registry: Option<PathBuf>,
}

impl ReloadSummary {
    pub fn has_errors(&self) -> bool {
        !self.outcome.is_success()
    }
}

#[derive(Debug)]
pub struct ViewSummary {
    pub view: String,
    pub description: String,
    pub rows: usize,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub reload: ReloadSummary,
    /// Absent when the reload failed.
    pub report: Option<QualityReport>,
}

impl CheckSummary {
    pub fn has_errors(&self) -> bool {
        self.reload.has_errors() || self.report.is_none()
    }

    pub fn failure_count(&self) -> usize {
        self.report
            .as_ref()
            .map_or(0, QualityReport::failure_count)
    }
}
