//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::ApiError;

/// Upstream API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the upstream API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TRANSIT_API_URL` | Upstream API base URL | `http://localhost:8000` |
    /// | `TRANSIT_API_TIMEOUT_SECS` | Per-request timeout in seconds | `10` |
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = env::var("TRANSIT_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let timeout_secs = match env::var("TRANSIT_API_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ApiError::Config(format!("Invalid TRANSIT_API_TIMEOUT_SECS: {raw}")))?,
            Err(_) => 10,
        };

        Ok(Self::new(base_url, Duration::from_secs(timeout_secs)))
    }

    /// Build a configuration directly, trimming any trailing slash off
    /// the base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, timeout }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000", Duration::from_secs(10))
    }
}
