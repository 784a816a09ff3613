use polars::prelude::PolarsError;
use thiserror::Error;

use medallion_warehouse::WarehouseError;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error("check {check} failed to evaluate: {source}")]
    Evaluation {
        check: String,
        #[source]
        source: PolarsError,
    },
}

impl ValidateError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Warehouse(err) => err.code(),
            Self::Evaluation { .. } => "VALIDATE_EVALUATION",
        }
    }
}
