use std::path::PathBuf;

use thiserror::Error;
use xgd_lib::XgdError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Codec or file operation failed
    #[error("{0}")]
    Xgd(#[from] XgdError),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `--check` found a sector that is not canonical
    #[error("{} is not in canonical form", .0.display())]
    NotCanonical(PathBuf),

    /// Invalid combination of arguments
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
