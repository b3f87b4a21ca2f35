//! # transit-api
//!
//! Async client for the upstream transit REST API: summary statistics,
//! vehicle positions, service alerts, route statistics, and
//! elevator/escalator outages.
//!
//! Fetch failures degrade rather than propagate: every endpoint has an
//! `_or_default` form returning empty lists or zeroed stats, and alerts
//! come back already normalized via `transit-core`.
//!
//! ```no_run
//! use transit_api::{ApiConfig, TransitClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), transit_api::ApiError> {
//!     let client = TransitClient::new(ApiConfig::from_env()?)?;
//!
//!     let alerts = client.normalized_alerts(None, Some("SEVERE")).await;
//!     for alert in alerts {
//!         println!("{}: {}", alert.severity, alert.header);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod poller;
mod types;

pub use client::TransitClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use poller::Poller;
pub use types::{
    ElevatorStats, Outage, OutageKind, Position, RouteStat, SummaryStats, Vehicle, VehicleStatus,
};
