//! Clone error types.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while cloning a single repository.
#[derive(Debug, Clone, Error)]
pub enum CloneError {
    /// The clone exceeded its time budget and was killed.
    #[error("git clone timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    /// The clone process exited unsuccessfully.
    #[error("git clone failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },

    /// The clone process could not be started.
    #[error("Failed to execute git clone: {message}")]
    Spawn { message: String },

    /// The repository's full name doesn't map to a path inside the target directory.
    #[error("Invalid destination for repository '{full_name}'")]
    InvalidDestination { full_name: String },

    /// The task running the clone panicked.
    #[error("Clone task panicked: {message}")]
    Panicked { message: String },
}
