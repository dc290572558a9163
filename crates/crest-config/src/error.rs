//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crest_scoring::InvalidConfig;

/// Errors that can occur while loading the plugin configuration.
///
/// Every variant is fatal at startup: the process logs the error and
/// refuses to start rather than schedule with a broken policy.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not the JSON document the plugin expects. Unknown or
    /// missing fields land here, not in validation.
    #[error("malformed config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The document decoded, but a field violates its constraint.
    #[error("invalid config: {0}")]
    Invalid(#[from] InvalidConfig),
}
