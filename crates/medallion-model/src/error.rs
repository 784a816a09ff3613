use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid pipeline config: {message}")]
    InvalidConfig { message: String },

    #[error("unknown table: {name}")]
    UnknownTable { name: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
