//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use super::ConfigDiagnostics;

/// Errors surfaced while loading or validating `folio.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    // No #[from]: the diagnostics Display already carries everything,
    // a source() would print it twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}
