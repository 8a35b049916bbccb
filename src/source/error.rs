//! Error types for history sources.

use thiserror::Error;

/// Reasons a refresh can fail to produce a series.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Could not reach the endpoint.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Any other transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The body is not a JSON array of numbers.
    #[error("Failed to decode history: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading a local history file failed.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}
