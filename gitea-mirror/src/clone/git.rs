//! Clone backends.

use super::CloneError;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Something that can clone a remote repository into a local directory.
#[async_trait]
pub trait Cloner: Send + Sync {
    /// Clones `clone_url` into `destination`.
    ///
    /// Dropping the returned future must abort the clone.
    async fn clone_repository(&self, clone_url: &str, destination: &Path)
        -> Result<(), CloneError>;
}

/// Clones by running `git clone <url> <destination>`.
#[derive(Debug, Clone)]
pub struct GitCloner {
    program: String,
}

impl GitCloner {
    /// Creates a cloner using `git` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Creates a cloner using a specific git executable.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCloner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cloner for GitCloner {
    async fn clone_repository(
        &self,
        clone_url: &str,
        destination: &Path,
    ) -> Result<(), CloneError> {
        debug!(url = %clone_url, destination = %destination.display(), "Running git clone");

        let output = Command::new(&self.program)
            .arg("clone")
            .arg(clone_url)
            .arg(destination)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CloneError::Spawn {
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CloneError::Failed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}
