//! Orchestrates a mirror run: list repositories, then clone them.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::clone::{entry_exists, CloneDispatcher, Cloner, GitCloner};
use crate::discovery::{discover_repositories, GiteaClient, RepositoryDescriptor};
use crate::summary::RunSummary;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs a complete mirror of a Gitea server.
pub struct Runner {
    config: RunnerConfig,
    client: GiteaClient,
    cloner: Arc<dyn Cloner>,
}

impl Runner {
    /// Builds a runner that clones with the system `git`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Discovery`] if the HTTP client can't be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        Self::with_cloner(config, Arc::new(GitCloner::new()))
    }

    /// Builds a runner with a custom clone backend.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Discovery`] if the HTTP client can't be built.
    pub fn with_cloner(config: RunnerConfig, cloner: Arc<dyn Cloner>) -> Result<Self, RunnerError> {
        let mirror = config.mirror();
        let client = GiteaClient::new(&mirror.host, &mirror.access_token)?;
        Ok(Self {
            config,
            client,
            cloner,
        })
    }

    /// Executes the full mirror flow.
    ///
    /// Listing failures abort the run before anything is cloned. Clone
    /// failures are logged and counted in the returned summary.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());
        let target_dir = &self.config.mirror().target_dir;

        if !self.config.dry_run() {
            ensure_target_dir(target_dir).await?;
        }

        let repositories = discover_repositories(&self.client, self.config.filter()).await?;
        info!(count = repositories.len(), "Found repositories");
        summary.repositories_discovered = repositories.len();

        if repositories.is_empty() {
            warn!("No repositories to mirror");
            return Ok(summary);
        }

        if self.config.dry_run() {
            print_dry_run_preview(&repositories, target_dir).await;
            return Ok(summary);
        }

        let dispatcher = CloneDispatcher::new(Arc::clone(&self.cloner), target_dir.clone())
            .with_timeout(self.config.clone_timeout())
            .with_concurrency(self.config.concurrency());
        let outcomes = dispatcher.dispatch(repositories).await;

        for outcome in &outcomes {
            summary.record_outcome(outcome);
            if let Some(e) = outcome.error() {
                error!(repo = %outcome.repository, error = %e, "Error cloning repository");
            }
        }

        Ok(summary)
    }
}

/// Creates the target directory if it doesn't exist yet.
async fn ensure_target_dir(target_dir: &Path) -> Result<(), RunnerError> {
    if tokio::fs::try_exists(target_dir).await.unwrap_or(false) {
        return Ok(());
    }

    info!(path = %target_dir.display(), "Creating target directory");
    tokio::fs::create_dir_all(target_dir)
        .await
        .map_err(|source| RunnerError::TargetDir {
            path: target_dir.display().to_string(),
            source,
        })
}

async fn print_dry_run_preview(repositories: &[RepositoryDescriptor], target_dir: &Path) {
    println!("\n[DRY RUN] Target directory: {}", target_dir.display());
    println!("  Found {} repositories:\n", repositories.len());

    for (i, repo) in repositories.iter().enumerate() {
        let state = dry_run_state(repo, target_dir).await;
        println!(
            "  [{}/{}] {} ({})",
            i + 1,
            repositories.len(),
            repo.full_name,
            state
        );
    }

    println!();
}

/// Describes what a live run would do with a repository.
async fn dry_run_state(repo: &RepositoryDescriptor, target_dir: &Path) -> &'static str {
    let Some(path) = repo.destination(target_dir) else {
        return "invalid destination";
    };

    if entry_exists(&path).await {
        "exists, would skip"
    } else {
        "would clone"
    }
}
