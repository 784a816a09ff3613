//! Full-reload loader.
//!
//! A batch walks `Start → Truncate(i) → Insert(i) → … → Done`, one table at a
//! time in registry order. The first failing step moves the batch to `Failed`;
//! remaining tables are reported as skipped and, in atomic mode, the layer is
//! restored to its pre-batch state.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use medallion_ingest::read_raw_table;
use medallion_model::{CommitMode, Layer, LoadReport, LoadStep, StepStatus, TableKind};
use medallion_transform::{LoadContext, cleanse_table};

use crate::error::{Result, WarehouseError};
use crate::store::Warehouse;

/// Produces the full contents of one layer table.
pub trait TableSource {
    /// Layer the produced frames are written to.
    fn layer(&self) -> Layer;

    /// Build the frame for `kind`. Called after the target was truncated.
    ///
    /// # Errors
    ///
    /// Any error fails the step and stops the batch.
    fn produce(&self, warehouse: &Warehouse, kind: TableKind) -> Result<DataFrame>;
}

/// Bronze source: the CSV extracts under a source root.
#[derive(Debug, Clone)]
pub struct ExtractSource {
    root: PathBuf,
}

impl ExtractSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TableSource for ExtractSource {
    fn layer(&self) -> Layer {
        Layer::Bronze
    }

    fn produce(&self, warehouse: &Warehouse, kind: TableKind) -> Result<DataFrame> {
        let path = warehouse.registry().source_path(&self.root, kind)?;
        Ok(read_raw_table(kind, &path)?)
    }
}

/// Silver source: the cleansing rules applied to the bronze tables.
#[derive(Debug, Clone, Copy)]
pub struct CleansingSource {
    ctx: LoadContext,
}

impl CleansingSource {
    pub fn new(ctx: LoadContext) -> Self {
        Self { ctx }
    }
}

impl TableSource for CleansingSource {
    fn layer(&self) -> Layer {
        Layer::Silver
    }

    fn produce(&self, warehouse: &Warehouse, kind: TableKind) -> Result<DataFrame> {
        let raw = warehouse.require(Layer::Bronze, kind)?;
        Ok(cleanse_table(kind, raw, &self.ctx)?)
    }
}

/// Loader states. Indices point into the registry's table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Start,
    Truncate(usize),
    Insert(usize),
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FullReloadLoader {
    commit_mode: CommitMode,
}

impl FullReloadLoader {
    pub fn new(commit_mode: CommitMode) -> Self {
        Self { commit_mode }
    }

    /// Reload every registered table of the source's layer.
    ///
    /// Failures never escape as `Err`; they end up in the report's error
    /// descriptor.
    pub fn run(&self, warehouse: &mut Warehouse, source: &impl TableSource) -> LoadReport {
        let layer = source.layer();
        let kinds: Vec<TableKind> = warehouse.registry().kinds().collect();
        let span = info_span!("full_reload", layer = %layer, tables = kinds.len());
        let _guard = span.enter();

        let batch_start = Instant::now();
        let snapshot = match self.commit_mode {
            CommitMode::Atomic => Some(warehouse.snapshot(layer)),
            CommitMode::PerTable => None,
        };
        let mut report = LoadReport::new(layer);
        let mut step_start = Instant::now();
        let mut state = LoadState::Start;

        loop {
            state = match state {
                LoadState::Start => {
                    info!(commit_mode = ?self.commit_mode, "load started");
                    if kinds.is_empty() {
                        LoadState::Done
                    } else {
                        LoadState::Truncate(0)
                    }
                }
                LoadState::Truncate(idx) => {
                    let kind = kinds[idx];
                    step_start = Instant::now();
                    match warehouse.truncate(layer, kind) {
                        Ok(()) => {
                            debug!(
                                table = %warehouse.registry().qualified_name(layer, kind),
                                "truncated"
                            );
                            LoadState::Insert(idx)
                        }
                        Err(err) => {
                            fail_step(&mut report, warehouse, layer, kind, step_start, &err);
                            LoadState::Failed
                        }
                    }
                }
                LoadState::Insert(idx) => {
                    let kind = kinds[idx];
                    let result = match source.produce(warehouse, kind) {
                        Ok(frame) => warehouse.insert(layer, kind, frame),
                        Err(err) => Err(err),
                    };
                    match result {
                        Ok(rows) => {
                            let duration = step_start.elapsed();
                            let table = warehouse.registry().qualified_name(layer, kind);
                            info!(
                                table = %table,
                                rows,
                                duration_ms = duration.as_millis(),
                                "table loaded"
                            );
                            report.steps.push(LoadStep {
                                kind,
                                table,
                                rows,
                                duration,
                                status: StepStatus::Loaded,
                            });
                            if idx + 1 < kinds.len() {
                                LoadState::Truncate(idx + 1)
                            } else {
                                LoadState::Done
                            }
                        }
                        Err(err) => {
                            fail_step(&mut report, warehouse, layer, kind, step_start, &err);
                            LoadState::Failed
                        }
                    }
                }
                LoadState::Done | LoadState::Failed => break,
            };
        }

        if state == LoadState::Failed {
            let attempted = report.steps.len();
            for &kind in kinds.iter().skip(attempted) {
                report.steps.push(LoadStep {
                    kind,
                    table: warehouse.registry().qualified_name(layer, kind),
                    rows: 0,
                    duration: Duration::ZERO,
                    status: StepStatus::Skipped,
                });
            }
            if let Some(snapshot) = snapshot {
                warehouse.restore(snapshot);
                report.rolled_back = true;
                warn!(layer = %layer, "batch rolled back");
            }
        }

        report.total_duration = batch_start.elapsed();
        info!(
            loaded_rows = report.loaded_rows(),
            success = report.is_success(),
            duration_ms = report.total_duration.as_millis(),
            "load finished"
        );
        report
    }
}

fn fail_step(
    report: &mut LoadReport,
    warehouse: &Warehouse,
    layer: Layer,
    kind: TableKind,
    started: Instant,
    err: &WarehouseError,
) {
    let duration = started.elapsed();
    let table = warehouse.registry().qualified_name(layer, kind);
    let descriptor = err.descriptor();
    warn!(
        table = %table,
        code = %descriptor.code,
        duration_ms = duration.as_millis(),
        error = %err,
        "table load failed"
    );
    report.steps.push(LoadStep {
        kind,
        table,
        rows: 0,
        duration,
        status: StepStatus::Failed,
    });
    report.error = Some(descriptor);
}

/// Reports of a bronze load followed by a silver reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReloadOutcome {
    pub bronze: LoadReport,
    /// Absent when the bronze load failed.
    pub silver: Option<LoadReport>,
}

impl ReloadOutcome {
    pub fn is_success(&self) -> bool {
        self.bronze.is_success() && self.silver.as_ref().is_some_and(LoadReport::is_success)
    }

    /// The report that carries the batch error, if any.
    pub fn failed_report(&self) -> Option<&LoadReport> {
        if !self.bronze.is_success() {
            return Some(&self.bronze);
        }
        self.silver.as_ref().filter(|report| !report.is_success())
    }
}

/// Load bronze from the extracts under `root`, then rebuild silver.
pub fn run_full_reload(
    warehouse: &mut Warehouse,
    root: &Path,
    ctx: LoadContext,
    commit_mode: CommitMode,
) -> ReloadOutcome {
    let loader = FullReloadLoader::new(commit_mode);
    let bronze = loader.run(warehouse, &ExtractSource::new(root));
    if !bronze.is_success() {
        warn!("bronze load failed, silver reload skipped");
        return ReloadOutcome {
            bronze,
            silver: None,
        };
    }
    let silver = loader.run(warehouse, &CleansingSource::new(ctx));
    ReloadOutcome {
        bronze,
        silver: Some(silver),
    }
}
