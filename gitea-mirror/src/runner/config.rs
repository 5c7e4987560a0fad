//! Runner configuration.

use crate::clone::DEFAULT_CLONE_TIMEOUT;
use crate::config::{FilterMode, MirrorConfig};
use std::time::Duration;

/// Configuration for a single mirror run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Server, token and target directory.
    mirror: MirrorConfig,
    /// Owner restriction.
    filter: FilterMode,
    /// Whether to list repositories without cloning them.
    dry_run: bool,
    /// Maximum simultaneous clones, unbounded when `None`.
    concurrency: Option<usize>,
    /// Time budget for each clone.
    clone_timeout: Duration,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(mirror: MirrorConfig, filter: FilterMode) -> Self {
        Self {
            mirror,
            filter,
            dry_run: false,
            concurrency: None,
            clone_timeout: DEFAULT_CLONE_TIMEOUT,
        }
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Caps the number of simultaneous clones.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the time budget for each clone.
    #[must_use]
    pub fn with_clone_timeout(mut self, clone_timeout: Duration) -> Self {
        self.clone_timeout = clone_timeout;
        self
    }

    /// Returns the loaded mirror configuration.
    pub fn mirror(&self) -> &MirrorConfig {
        &self.mirror
    }

    /// Returns the owner filter.
    pub fn filter(&self) -> &FilterMode {
        &self.filter
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the clone concurrency cap.
    pub fn concurrency(&self) -> Option<usize> {
        self.concurrency
    }

    /// Returns the per-clone timeout.
    pub fn clone_timeout(&self) -> Duration {
        self.clone_timeout
    }
}
