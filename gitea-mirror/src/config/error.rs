//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading the mirror configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A non-comment line without a `KEY=VALUE` separator.
    #[error("Bad line {line_number} in config file '{path}': {line}")]
    MalformedLine {
        path: String,
        line_number: usize,
        line: String,
    },

    /// A required key is absent or empty.
    #[error("Missing required key '{key}' in '{path}'")]
    MissingKey { path: String, key: &'static str },

    /// Validation error in a configured value.
    #[error("Validation error for '{key}': {message}")]
    ValidationError { key: &'static str, message: String },
}
