//! Run summary types.

use super::outcome::{CloneOutcome, CloneStatus};

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of repositories returned by discovery.
    pub repositories_discovered: usize,

    /// Number of repositories cloned during this run.
    pub cloned: usize,

    /// Number of repositories skipped because they already existed.
    pub skipped: usize,

    /// Number of repositories that failed to clone.
    pub failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a clone outcome.
    pub fn record_outcome(&mut self, outcome: &CloneOutcome) {
        match outcome.status {
            CloneStatus::Cloned => self.cloned += 1,
            CloneStatus::Skipped => self.skipped += 1,
            CloneStatus::Failed { .. } => self.failed += 1,
        }
    }

    /// Returns true if any clone failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Total number of recorded outcomes.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.cloned + self.skipped + self.failed
    }
}
