//! Load batch reporting types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::table::{Layer, TableKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Warning,
    Error,
    Fatal,
}

/// Message, code and severity of a failed load step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub message: String,
    /// Stable machine-readable error code (e.g. `INGEST_TYPE_CONVERSION`).
    pub code: String,
    pub severity: ErrorSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Loaded,
    Failed,
    /// Not attempted because an earlier step failed.
    Skipped,
}

/// Outcome of a single truncate-and-insert step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStep {
    pub kind: TableKind,
    /// Qualified target table name.
    pub table: String,
    pub rows: usize,
    pub duration: Duration,
    pub status: StepStatus,
}

/// Outcome of a full reload batch over one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub layer: Layer,
    pub steps: Vec<LoadStep>,
    pub total_duration: Duration,
    /// Set when the batch stopped on a failure.
    pub error: Option<ErrorDescriptor>,
    /// True when an atomic batch restored the layer after a failure.
    #[serde(default)]
    pub rolled_back: bool,
}

impl LoadReport {
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            steps: Vec::new(),
            total_duration: Duration::ZERO,
            error: None,
            rolled_back: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn loaded_rows(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Loaded)
            .map(|step| step.rows)
            .sum()
    }

    pub fn failed_step(&self) -> Option<&LoadStep> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Failed)
    }

    pub fn step(&self, kind: TableKind) -> Option<&LoadStep> {
        self.steps.iter().find(|step| step.kind == kind)
    }
}
