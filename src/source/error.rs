//! Error types shared by game state sources.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`SourceError`] failures.
pub type SourceResult<T> = Result<T, SourceError>;

/// Failures that can occur while fetching the remote game state.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build game state HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or timed out.
    #[error("failed to send game state request to `{url}`")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-success status code.
    #[error("unexpected game state response status {status} for `{url}`")]
    RequestStatus { url: String, status: StatusCode },
    /// The response body was not a valid game state.
    #[error("failed to decode game state response from `{url}`")]
    DecodeResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
