//! Runner error types.

/// Errors that abort a mirror run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Identity lookup or repository listing errors.
    #[error(transparent)]
    Discovery(#[from] crate::discovery::DiscoveryError),

    /// The target directory could not be created.
    #[error("Failed to create target directory '{path}': {source}")]
    TargetDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
