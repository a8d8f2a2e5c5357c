//! Error types for buildpod.
//!
//! The naming and merging operations never fail. Errors only come from the
//! ambient parts of the crate: loading configuration and parsing CLI input.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// buildpod error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config file could not be read.
    #[error("failed to load config from {}: {source}", .path.display())]
    ConfigLoad {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be deserialized.
    #[error("failed to parse config {}: {message}", .path.display())]
    ConfigParse {
        /// Path that was parsed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Config values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Malformed `KEY=VALUE` argument.
    #[error("invalid environment variable '{spec}': {reason}")]
    InvalidEnv {
        /// The offending argument.
        spec: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Output serialization failed.
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub(crate) fn config_parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
