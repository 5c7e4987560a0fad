//! Repository discovery error types.

use thiserror::Error;

/// Errors that can occur while listing repositories.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Transport-level failure talking to the server.
    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status other than 200 OK.
    #[error("API request to '{url}' failed with HTTP status code: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
