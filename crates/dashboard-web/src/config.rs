//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use transit_api::ApiConfig;

/// Dashboard server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Upstream API client configuration.
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `DASHBOARD_ADDR` | Server bind address | `127.0.0.1:8787` |
    /// | `TRANSIT_API_URL` | Upstream API base URL | `http://localhost:8000` |
    /// | `TRANSIT_API_TIMEOUT_SECS` | Upstream request timeout | `10` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("DASHBOARD_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8787".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let api = ApiConfig::from_env().map_err(|e| ConfigError::Api(e.to_string()))?;

        Ok(Self { addr, api })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid DASHBOARD_ADDR format")]
    InvalidAddr,

    #[error("Upstream API configuration error: {0}")]
    Api(String),
}
