//! Errors raised while taking in externally authored configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        ConfigError::Invalid(detail.into())
    }
}
