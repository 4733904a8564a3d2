use std::path::PathBuf;

use thiserror::Error;

use microbequest_core::config::LocationId;
use microbequest_core::error::ConfigError;

use crate::control::ControlError;

/// Everything that can stop a run before it produces a summary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Control(#[from] ControlError),
    #[error("unknown location '{0}'")]
    UnknownLocation(LocationId),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
