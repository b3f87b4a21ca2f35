//! Error types for the transit API client.

use thiserror::Error;

/// Errors that can occur when talking to the upstream API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed at the transport level (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {status} for {endpoint}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
