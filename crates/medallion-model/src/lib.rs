//! Medallion warehouse data model.
//!
//! - **table**: layers, source tables, gold views and their column sets
//! - **columns**: column name constants shared by every crate
//! - **registry**: pipeline configuration and the qualified table registry
//! - **load**: load step and batch report types
//! - **quality**: quality check results and the suite report

pub mod columns;
pub mod error;
pub mod load;
pub mod quality;
pub mod registry;
pub mod table;

pub use error::{ModelError, Result};
pub use load::{ErrorDescriptor, ErrorSeverity, LoadReport, LoadStep, StepStatus};
pub use quality::{CheckKind, CheckResult, QualityReport};
pub use registry::{
    CommitMode, KeyStrategy, PipelineConfig, ReloadSettings, SchemaNames, TableEntry,
    TableRegistry,
};
pub use table::{ColumnDef, ColumnType, GoldView, Layer, SourceSystem, TableKind};
