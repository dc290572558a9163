//! Validation error for scoring configuration.

use thiserror::Error;

/// A configuration field that failed validation.
///
/// `path` is the JSON path of the offending field — relative to the object
/// that was validated, and re-rooted with [`InvalidConfig::nested`] as the
/// error bubbles out to the document root (e.g. `scoring.minUsageScore`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value at {path}: {message}")]
pub struct InvalidConfig {
    /// JSON path of the rejected field.
    pub path: String,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl InvalidConfig {
    /// Flag the field at `path` with a constraint message.
    pub fn new(path: &str, message: &str) -> Self {
        Self {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// Re-root the path under an enclosing object's field name.
    ///
    /// Lets a sub-config's validation compose into a larger document:
    /// an error at `minUsageScore` nested under `scoring` reports
    /// `scoring.minUsageScore`.
    pub fn nested(mut self, field: &str) -> Self {
        self.path = format!("{field}.{}", self.path);
        self
    }
}
