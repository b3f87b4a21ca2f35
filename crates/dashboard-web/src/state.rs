//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use transit_api::{Poller, SummaryStats, TransitClient};

/// How often the background summary cache refreshes.
const SUMMARY_POLL_PERIOD: Duration = Duration::from_secs(60);

/// Shared application state.
///
/// Page handlers fetch on demand; the summary poller keeps a warm
/// snapshot of `/stats/summary` for the JSON stats endpoint and stops
/// with the state (dropping it aborts the task).
#[derive(Clone)]
pub struct AppState {
    /// Upstream API client.
    pub client: TransitClient,
    /// Background summary cache.
    pub summary: Arc<Poller<SummaryStats>>,
}

impl AppState {
    /// Create new application state and start the summary poller.
    pub fn new(client: TransitClient) -> Self {
        let poll_client = client.clone();
        let summary = Arc::new(Poller::spawn(
            SummaryStats::default(),
            SUMMARY_POLL_PERIOD,
            move || {
                let client = poll_client.clone();
                async move { client.summary_stats().await }
            },
        ));

        Self { client, summary }
    }
}
