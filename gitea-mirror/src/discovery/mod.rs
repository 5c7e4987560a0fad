//! Repository discovery using the Gitea REST API.
//!
//! This module pages through `/api/v1/user/repos` until the server returns an
//! empty page, optionally keeping only the repositories of a single owner.

mod error;
mod repository;

pub use error::DiscoveryError;
pub use repository::RepositoryDescriptor;

use crate::config::FilterMode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, info_span, Instrument};

/// Endpoint returning the user the token belongs to.
const USER_ENDPOINT: &str = "/api/v1/user";

/// Endpoint listing repositories visible to the token.
const USER_REPOS_ENDPOINT: &str = "/api/v1/user/repos";

/// Upper bound for a single API request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Minimal Gitea API client authenticated with a static access token.
#[derive(Clone)]
pub struct GiteaClient {
    http: reqwest::Client,
    host: String,
    token: String,
}

/// Subset of the `/api/v1/user` response.
#[derive(Debug, Deserialize)]
struct UserDetails {
    login: String,
}

impl GiteaClient {
    /// Creates a client for `host` (without a trailing `/`).
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Client`] if the HTTP client can't be built.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Result<Self, DiscoveryError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gitea-mirror/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DiscoveryError::Client)?;

        Ok(Self {
            http,
            host: host.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Returns the server base URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetches the login of the user the token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] on transport failure, a status other than 200 or
    /// an undecodable body.
    pub async fn fetch_username(&self) -> Result<String, DiscoveryError> {
        let url = format!("{}{}", self.host, USER_ENDPOINT);
        let details: UserDetails = self.get_json(&url).await?;
        Ok(details.login)
    }

    /// Fetches a single page of the repository listing.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] on transport failure, a status other than 200 or
    /// an undecodable body.
    pub async fn fetch_repository_page(
        &self,
        page: u32,
    ) -> Result<Vec<RepositoryDescriptor>, DiscoveryError> {
        let url = format!("{}{}?page={}", self.host, USER_REPOS_ENDPOINT, page);
        self.get_json(&url).await
    }

    /// Performs an authenticated GET and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DiscoveryError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.token))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| DiscoveryError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(DiscoveryError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| DiscoveryError::Request {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| DiscoveryError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Lists every repository visible to the client's token.
///
/// When `filter` is active only repositories whose owner segment equals the
/// filter user are kept; [`FilterMode::CurrentUser`] is first resolved through
/// the `/api/v1/user` endpoint.
///
/// # Returns
///
/// Repositories in page order, entry order as returned by the server.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if any request fails. No partial results are
/// returned.
pub async fn discover_repositories(
    client: &GiteaClient,
    filter: &FilterMode,
) -> Result<Vec<RepositoryDescriptor>, DiscoveryError> {
    let span = info_span!("discover", host = %client.host());

    async {
        let owner = resolve_owner(client, filter).await?;
        match &owner {
            Some(owner) => info!(owner = %owner, "Listing repositories for owner"),
            None => info!("Listing all visible repositories"),
        }

        let mut repositories = Vec::new();
        let mut page = 1;
        loop {
            let entries = client.fetch_repository_page(page).await?;
            if entries.is_empty() {
                debug!(page, "Reached empty page");
                break;
            }

            debug!(page, count = entries.len(), "Fetched page");
            repositories.extend(filter_by_owner(entries, owner.as_deref()));
            page += 1;
        }

        info!(count = repositories.len(), "Discovery complete");
        Ok(repositories)
    }
    .instrument(span)
    .await
}

/// Resolves the owner name a filter mode restricts the listing to.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the current user can't be looked up.
pub async fn resolve_owner(
    client: &GiteaClient,
    filter: &FilterMode,
) -> Result<Option<String>, DiscoveryError> {
    match filter {
        FilterMode::None => Ok(None),
        FilterMode::NamedUser(name) => Ok(Some(name.clone())),
        FilterMode::CurrentUser => {
            let username = client.fetch_username().await?;
            debug!(username = %username, "Resolved current user");
            Ok(Some(username))
        }
    }
}

/// Keeps repositories whose owner segment equals `owner`, or all of them when
/// `owner` is `None` or empty.
pub fn filter_by_owner(
    repositories: Vec<RepositoryDescriptor>,
    owner: Option<&str>,
) -> Vec<RepositoryDescriptor> {
    match owner {
        Some(owner) if !owner.is_empty() => repositories
            .into_iter()
            .filter(|repo| repo.owner() == owner)
            .collect(),
        _ => repositories,
    }
}
