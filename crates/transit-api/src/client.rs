//! HTTP client for the upstream transit API.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use transit_core::{filter_by_severity, normalize_alerts, NormalizedAlert, RawAlert};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{Outage, OutageKind, RouteStat, SummaryStats, Vehicle};

/// Client for the upstream transit REST API.
///
/// All fetches share one pooled connection and the configured timeout.
/// The `*_or_default` variants absorb any failure into a safe default so
/// page handlers never see an error, matching the degradation contract:
/// network problems and malformed responses produce empty lists or zeroed
/// counters, logged at warn level, and the next poll tries again.
#[derive(Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: String,
}

impl TransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = %url, params = ?params, "GET");

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status });
        }

        Ok(response.json().await?)
    }

    /// `GET /stats/summary`.
    pub async fn summary_stats(&self) -> Result<SummaryStats, ApiError> {
        self.get_json("/stats/summary", &[]).await
    }

    /// Summary stats, or zeroed counters on failure.
    pub async fn summary_stats_or_default(&self) -> SummaryStats {
        match self.summary_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "Failed to fetch summary stats, using defaults");
                SummaryStats::default()
            }
        }
    }

    /// `GET /vehicles`, optionally filtered by exact route or by route
    /// family (`bus`, `xbus`, `simbus`).
    pub async fn vehicles(
        &self,
        route_id: Option<&str>,
        route_type: Option<&str>,
    ) -> Result<Vec<Vehicle>, ApiError> {
        let mut params = Vec::new();
        if let Some(route_id) = route_id.filter(|r| !r.is_empty()) {
            params.push(("route_id", route_id.to_string()));
        }
        if let Some(route_type) = route_type.filter(|r| !r.is_empty()) {
            params.push(("route_type", route_type.to_string()));
        }
        self.get_json("/vehicles", &params).await
    }

    /// Vehicles, or an empty list on failure.
    pub async fn vehicles_or_default(
        &self,
        route_id: Option<&str>,
        route_type: Option<&str>,
    ) -> Vec<Vehicle> {
        match self.vehicles(route_id, route_type).await {
            Ok(vehicles) => vehicles,
            Err(err) => {
                warn!(error = %err, "Failed to fetch vehicles");
                Vec::new()
            }
        }
    }

    /// `GET /routes/stats`.
    pub async fn route_stats(&self) -> Result<Vec<RouteStat>, ApiError> {
        self.get_json("/routes/stats", &[]).await
    }

    /// Route stats, or an empty list on failure.
    pub async fn route_stats_or_default(&self) -> Vec<RouteStat> {
        match self.route_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "Failed to fetch route stats");
                Vec::new()
            }
        }
    }

    /// `GET /alerts`, returning raw upstream records. The severity query
    /// parameter is uppercased and omitted when blank.
    pub async fn alerts(
        &self,
        route_id: Option<&str>,
        severity: Option<&str>,
    ) -> Result<Vec<RawAlert>, ApiError> {
        let mut params = Vec::new();
        if let Some(route_id) = route_id.filter(|r| !r.is_empty()) {
            params.push(("route_id", route_id.to_string()));
        }
        if let Some(severity) = severity.map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("severity", severity.to_uppercase()));
        }
        self.get_json("/alerts", &params).await
    }

    /// Fetch, normalize, and severity-filter alerts.
    ///
    /// The filter runs against the *normalized* severity, after the
    /// heuristics have filled gaps; the upstream filter alone would drop
    /// alerts whose raw severity is absent. A fetch failure yields an
    /// empty list, never an error.
    pub async fn normalized_alerts(
        &self,
        route_id: Option<&str>,
        severity: Option<&str>,
    ) -> Vec<NormalizedAlert> {
        let raw = match self.alerts(route_id, severity).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "Failed to fetch alerts");
                return Vec::new();
            }
        };

        debug!(count = raw.len(), "Fetched alerts");
        let normalized = normalize_alerts(raw);
        match severity.map(str::trim).filter(|s| !s.is_empty()) {
            Some(severity) => filter_by_severity(normalized, severity),
            None => normalized,
        }
    }

    /// `GET /elevators/outages` for the given window, optionally scoped
    /// to one station.
    pub async fn elevator_outages(
        &self,
        kind: OutageKind,
        station: Option<&str>,
    ) -> Result<Vec<Outage>, ApiError> {
        let mut params = vec![("type", kind.as_param().to_string())];
        if let Some(station) = station.filter(|s| !s.is_empty()) {
            params.push(("station", station.to_string()));
        }
        self.get_json("/elevators/outages", &params).await
    }

    /// Elevator outages, or an empty list on failure.
    pub async fn elevator_outages_or_default(
        &self,
        kind: OutageKind,
        station: Option<&str>,
    ) -> Vec<Outage> {
        match self.elevator_outages(kind, station).await {
            Ok(outages) => outages,
            Err(err) => {
                warn!(error = %err, "Failed to fetch elevator outages");
                Vec::new()
            }
        }
    }
}
