//! Per-repository clone outcomes.

use crate::clone::CloneError;

/// What happened to a single repository.
#[derive(Debug, Clone)]
pub enum CloneStatus {
    /// The repository was cloned.
    Cloned,

    /// A local entry already existed, so nothing was done.
    Skipped,

    /// The clone failed.
    Failed {
        /// Failure detail.
        error: CloneError,
    },
}

/// Result of mirroring a single repository.
#[derive(Debug, Clone)]
pub struct CloneOutcome {
    /// Repository full name.
    pub repository: String,

    /// Outcome of the attempt.
    pub status: CloneStatus,
}

impl CloneOutcome {
    /// Outcome for a freshly cloned repository.
    #[must_use]
    pub fn cloned(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            status: CloneStatus::Cloned,
        }
    }

    /// Outcome for a repository that already existed locally.
    #[must_use]
    pub fn skipped(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            status: CloneStatus::Skipped,
        }
    }

    /// Outcome for a failed clone.
    #[must_use]
    pub fn failed(repository: impl Into<String>, error: CloneError) -> Self {
        Self {
            repository: repository.into(),
            status: CloneStatus::Failed { error },
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&CloneError> {
        match &self.status {
            CloneStatus::Failed { error } => Some(error),
            CloneStatus::Cloned | CloneStatus::Skipped => None,
        }
    }

    /// Returns true unless the clone failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error().is_none()
    }
}
