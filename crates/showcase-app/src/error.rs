//! Application errors.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid replay script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("{example} is not shown on the {library} page")]
    ExampleNotMounted { library: String, example: String },
}

impl AppError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Write {
            path: path.into(),
            source,
        }
    }
}
