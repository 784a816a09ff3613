use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{table}: {source}")]
    Frame {
        table: &'static str,
        #[source]
        source: PolarsError,
    },
}

impl TransformError {
    pub(crate) fn frame(table: &'static str) -> impl FnOnce(PolarsError) -> Self {
        move |source| Self::Frame { table, source }
    }

    /// Stable error code reported in load error descriptors.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Frame { .. } => "TRANSFORM_FRAME",
        }
    }
}
