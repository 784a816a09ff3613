use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source file not found: {path}")]
    MissingSource { path: PathBuf },

    #[error("failed to read csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{table}: missing column {column}")]
    MissingColumn { table: String, column: String },

    #[error("{table}: cannot convert {value:?} in column {column} (row {row}) to {expected}")]
    TypeConversion {
        table: String,
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl IngestError {
    /// Stable error code reported in load error descriptors.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingSource { .. } => "INGEST_MISSING_SOURCE",
            Self::Csv { .. } => "INGEST_CSV_READ",
            Self::MissingColumn { .. } => "INGEST_MISSING_COLUMN",
            Self::TypeConversion { .. } => "INGEST_TYPE_CONVERSION",
            Self::Polars(_) => "INGEST_FRAME",
        }
    }
}
