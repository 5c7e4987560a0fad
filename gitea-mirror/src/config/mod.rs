//! Mirror configuration loading.
//!
//! The configuration lives in a `KEY=VALUE` file (by default `config.env`)
//! holding the server address, the access token and the directory
//! repositories are mirrored into. Environment variables with the same names
//! override values from the file.

mod env_file;
mod error;
mod filter;

pub use error::ConfigError;
pub use filter::FilterMode;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Key holding the base URL of the Gitea server.
pub const HOST_KEY: &str = "GITEA_HOST";

/// Key holding the API access token.
pub const ACCESS_TOKEN_KEY: &str = "GITEA_ACCESS_TOKEN";

/// Key holding the directory repositories are cloned into.
pub const TARGET_DIR_KEY: &str = "TARGET_DIR";

/// Settings loaded from the configuration file.
#[derive(Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    /// Base URL of the Gitea server, without a trailing `/`.
    pub host: String,

    /// Token sent as `Authorization: token <access_token>`.
    pub access_token: String,

    /// Directory repositories are mirrored into.
    pub target_dir: PathBuf,
}

impl std::fmt::Debug for MirrorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorConfig")
            .field("host", &self.host)
            .field("access_token", &"<redacted>")
            .field("target_dir", &self.target_dir)
            .finish()
    }
}

impl MirrorConfig {
    /// Loads the configuration from a `KEY=VALUE` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read, contains a malformed
    /// line, lacks a required key, or holds an invalid host URL.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading configuration");

        let path_str = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path_str.clone(),
            source,
        })?;

        let mut values = env_file::parse_env_file(&contents, &path_str)?;
        apply_env_overrides(&mut values);
        Self::from_values(&values, &path_str)
    }

    /// Builds the configuration from already-parsed key/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required key is missing or the host is not
    /// an absolute URL.
    pub fn from_values(values: &HashMap<String, String>, path: &str) -> Result<Self, ConfigError> {
        let host = required(values, HOST_KEY, path)?;
        let access_token = required(values, ACCESS_TOKEN_KEY, path)?;
        let target_dir = required(values, TARGET_DIR_KEY, path)?;

        Ok(Self {
            host: normalize_host(&host)?,
            access_token,
            target_dir: PathBuf::from(target_dir),
        })
    }
}

/// Replaces file values with non-empty environment variables of the same name.
fn apply_env_overrides(values: &mut HashMap<String, String>) {
    for key in [HOST_KEY, ACCESS_TOKEN_KEY, TARGET_DIR_KEY] {
        if let Ok(value) = std::env::var(key) {
            if !value.trim().is_empty() {
                debug!(key, "Using value from environment");
                values.insert(key.to_string(), value.trim().to_string());
            }
        }
    }
}

fn required(
    values: &HashMap<String, String>,
    key: &'static str,
    path: &str,
) -> Result<String, ConfigError> {
    match values.get(key) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(ConfigError::MissingKey {
            path: path.to_string(),
            key,
        }),
    }
}

/// Validates the host URL and strips trailing slashes.
fn normalize_host(host: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(host).map_err(|e| ConfigError::ValidationError {
        key: HOST_KEY,
        message: format!("not a valid URL ({e}): {host}"),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError {
            key: HOST_KEY,
            message: format!("unsupported scheme '{}': {host}", parsed.scheme()),
        });
    }

    Ok(host.trim_end_matches('/').to_string())
}
