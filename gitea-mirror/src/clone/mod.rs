//! Concurrent repository cloning.
//!
//! Every repository gets its own spawned task with its own timeout. A task
//! checks whether the destination already exists, and if not, runs the
//! configured [`Cloner`]. Failures stay local to their task and are returned
//! as [`CloneOutcome`]s once every task has finished.

mod error;
mod git;

pub use error::CloneError;
pub use git::{Cloner, GitCloner};

use crate::discovery::RepositoryDescriptor;
use crate::summary::CloneOutcome;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};

/// Time budget for a single clone.
pub const DEFAULT_CLONE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Fans clones out over the repositories and collects their outcomes.
#[derive(Clone)]
pub struct CloneDispatcher {
    cloner: Arc<dyn Cloner>,
    base_dir: PathBuf,
    timeout: Duration,
    concurrency: Option<usize>,
}

impl CloneDispatcher {
    /// Creates a dispatcher cloning into `base_dir`.
    ///
    /// Clones are unbounded in number and use [`DEFAULT_CLONE_TIMEOUT`].
    pub fn new(cloner: Arc<dyn Cloner>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            cloner,
            base_dir: base_dir.into(),
            timeout: DEFAULT_CLONE_TIMEOUT,
            concurrency: None,
        }
    }

    /// Sets the per-repository timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps the number of simultaneous clones. `None` or `0` means unbounded.
    #[must_use]
    pub fn with_concurrency(mut self, limit: Option<usize>) -> Self {
        self.concurrency = limit.filter(|&n| n > 0);
        self
    }

    /// Mirrors every repository and waits for all of them to finish.
    ///
    /// # Returns
    ///
    /// Exactly one outcome per repository, in completion order.
    pub async fn dispatch(&self, repositories: Vec<RepositoryDescriptor>) -> Vec<CloneOutcome> {
        let limit = self
            .concurrency
            .unwrap_or(repositories.len())
            .max(1);
        debug!(count = repositories.len(), limit, "Dispatching clones");

        stream::iter(repositories)
            .map(|repository| {
                let full_name = repository.full_name.clone();
                let handle = tokio::spawn(clone_one(
                    Arc::clone(&self.cloner),
                    self.base_dir.clone(),
                    self.timeout,
                    repository,
                ));

                async move {
                    handle.await.unwrap_or_else(|e| {
                        CloneOutcome::failed(
                            full_name,
                            CloneError::Panicked {
                                message: e.to_string(),
                            },
                        )
                    })
                }
            })
            .buffer_unordered(limit)
            .collect()
            .await
    }
}

/// Mirrors a single repository.
async fn clone_one(
    cloner: Arc<dyn Cloner>,
    base_dir: PathBuf,
    timeout: Duration,
    repository: RepositoryDescriptor,
) -> CloneOutcome {
    let span = info_span!("clone", repo = %repository.full_name);

    async move {
        let Some(destination) = repository.destination(&base_dir) else {
            warn!("Repository name resolves outside the target directory");
            let error = CloneError::InvalidDestination {
                full_name: repository.full_name.clone(),
            };
            return CloneOutcome::failed(repository.full_name, error);
        };

        if entry_exists(&destination).await {
            info!("Repository already exists, skipping");
            return CloneOutcome::skipped(repository.full_name);
        }

        info!(url = %repository.clone_url, "Cloning repository");
        let result = tokio::time::timeout(
            timeout,
            cloner.clone_repository(&repository.clone_url, &destination),
        )
        .await
        .unwrap_or(Err(CloneError::Timeout(timeout)));

        match result {
            Ok(()) => {
                info!("Clone complete");
                CloneOutcome::cloned(repository.full_name)
            }
            Err(e) => {
                debug!(error = %e, "Clone failed");
                CloneOutcome::failed(repository.full_name, e)
            }
        }
    }
    .instrument(span)
    .await
}

/// Returns true if anything exists at `path`.
///
/// Errors other than "not found" count as existing.
pub(crate) async fn entry_exists(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(_) => true,
        Err(e) => e.kind() != std::io::ErrorKind::NotFound,
    }
}
