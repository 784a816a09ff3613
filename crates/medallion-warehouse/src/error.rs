use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

use medallion_ingest::IngestError;
use medallion_model::{ErrorDescriptor, ErrorSeverity, Layer, ModelError, TableKind};
use medallion_transform::TransformError;

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("{layer}.{table} has not been loaded")]
    MissingTable { layer: Layer, table: TableKind },

    #[error("{table} does not match its declared columns: {message}")]
    Schema { table: String, message: String },

    #[error("failed to access key registry {path}: {source}")]
    KeyRegistryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid key registry {path}: {source}")]
    KeyRegistryFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl WarehouseError {
    /// Stable error code reported in load error descriptors.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ingest(err) => err.code(),
            Self::Transform(err) => err.code(),
            Self::Model(_) => "WAREHOUSE_CONFIG",
            Self::MissingTable { .. } => "WAREHOUSE_MISSING_TABLE",
            Self::Schema { .. } => "WAREHOUSE_SCHEMA",
            Self::KeyRegistryIo { .. } => "WAREHOUSE_KEY_REGISTRY_IO",
            Self::KeyRegistryFormat { .. } => "WAREHOUSE_KEY_REGISTRY_FORMAT",
            Self::Polars(_) => "WAREHOUSE_FRAME",
        }
    }

    /// Data problems stop the batch; store inconsistencies are fatal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Ingest(_) | Self::Transform(_) | Self::Model(_) => ErrorSeverity::Error,
            Self::MissingTable { .. }
            | Self::Schema { .. }
            | Self::KeyRegistryIo { .. }
            | Self::KeyRegistryFormat { .. }
            | Self::Polars(_) => ErrorSeverity::Fatal,
        }
    }

    pub fn descriptor(&self) -> ErrorDescriptor {
        ErrorDescriptor {
            message: self.to_string(),
            code: self.code().to_string(),
            severity: self.severity(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WarehouseError>;
