//! crest-config — configuration for the Crest scheduler plugin.
//!
//! The plugin reads one JSON document (mounted from a ConfigMap) at
//! startup. This crate owns that document end to end: the typed [`Config`]
//! model, strict decoding (unknown fields are a parse error), and
//! fail-fast validation that names the offending JSON path. A [`Config`]
//! returned by [`Config::from_file`] has already been validated and is
//! treated as immutable shared state for the rest of the process lifetime.
//!
//! The scoring parameters under the `scoring` key belong to
//! [`crest_scoring`]; their validation composes into [`Config::validate`]
//! by path prefixing.

pub mod config;
pub mod error;

pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use error::ConfigError;
