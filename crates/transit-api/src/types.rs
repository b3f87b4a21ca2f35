//! Typed response models for the upstream API.
//!
//! Every field that the upstream may omit carries `#[serde(default)]` so a
//! sparse record deserializes instead of failing; missing-field responses
//! are a degradation case, not an error (see the client).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Response of `GET /stats/summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    #[serde(default)]
    pub active_vehicles: u64,
    #[serde(default)]
    pub vehicles_by_line: HashMap<String, u64>,
    #[serde(default)]
    pub vehicles_by_route: HashMap<String, u64>,
    #[serde(default)]
    pub elevator_escalator_stats: ElevatorStats,
    #[serde(default)]
    pub active_alerts: u64,
}

/// Elevator/escalator outage counters inside the summary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ElevatorStats {
    #[serde(default)]
    pub active_outages: u64,
    #[serde(default)]
    pub upcoming_outages: u64,
}

/// Geographic position of a vehicle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub bearing: Option<f64>,
}

impl Position {
    /// Coordinates if both components are present; map markers skip
    /// vehicles without them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// A vehicle position record from `GET /vehicles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub line_id: String,
    #[serde(default)]
    pub trip_id: String,
    #[serde(default)]
    pub route_id: String,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub current_status: Option<i64>,
    #[serde(default)]
    pub current_stop_sequence: Option<i64>,
    #[serde(default)]
    pub stop_id: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub timestamp: i64,
}

impl Vehicle {
    /// Decode the GTFS-style numeric status.
    pub fn status(&self) -> VehicleStatus {
        VehicleStatus::from_code(self.current_status)
    }
}

/// GTFS vehicle stop status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    IncomingAt,
    StoppedAt,
    InTransitTo,
    Unknown,
}

impl VehicleStatus {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::IncomingAt,
            Some(1) => Self::StoppedAt,
            Some(2) => Self::InTransitTo,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::IncomingAt => "Incoming at",
            Self::StoppedAt => "Stopped at",
            Self::InTransitTo => "In transit to",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// One row of `GET /routes/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteStat {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub line_id: Option<String>,
}

impl RouteStat {
    /// Chart label for this row. Rows without a usable route id are
    /// relabelled from their line, or `Non-revenue` when nothing
    /// identifies them.
    pub fn display_name(&self) -> String {
        if self.id.is_empty() || self.id == "Unknown" {
            match self.line_id.as_deref() {
                Some(line) if !line.is_empty() && line != "Unknown" => format!("{line} Line"),
                _ => "Non-revenue".to_string(),
            }
        } else {
            self.id.clone()
        }
    }
}

/// Which outage window to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutageKind {
    #[default]
    Current,
    Upcoming,
}

impl OutageKind {
    /// The `type` query value the upstream expects.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Upcoming => "upcoming",
        }
    }

    /// Parse a query value, defaulting to current.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("upcoming") {
            Self::Upcoming
        } else {
            Self::Current
        }
    }
}

/// An elevator/escalator outage record from `GET /elevators/outages`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outage {
    #[serde(default, alias = "station")]
    pub station_name: String,
    #[serde(default)]
    pub equipment_id: String,
    #[serde(default)]
    pub equipment_type: String,
    #[serde(default)]
    pub serving: String,
    #[serde(default)]
    pub outage_start: Option<String>,
    #[serde(default)]
    pub outage_end: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub borough: Option<String>,
    #[serde(default)]
    pub trains: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_defaults_for_missing_fields() {
        let stats: SummaryStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.active_vehicles, 0);
        assert_eq!(stats.elevator_escalator_stats.active_outages, 0);
        assert!(stats.vehicles_by_line.is_empty());
    }

    #[test]
    fn test_vehicle_status_labels() {
        assert_eq!(VehicleStatus::from_code(Some(1)).to_string(), "Stopped at");
        assert_eq!(VehicleStatus::from_code(Some(7)), VehicleStatus::Unknown);
        assert_eq!(VehicleStatus::from_code(None), VehicleStatus::Unknown);
    }

    #[test]
    fn test_route_stat_display_name() {
        let named = RouteStat { id: "7".into(), count: 12, line_id: None };
        assert_eq!(named.display_name(), "7");

        let by_line = RouteStat {
            id: "Unknown".into(),
            count: 3,
            line_id: Some("IRT".into()),
        };
        assert_eq!(by_line.display_name(), "IRT Line");

        let anonymous = RouteStat { id: String::new(), count: 1, line_id: None };
        assert_eq!(anonymous.display_name(), "Non-revenue");
    }

    #[test]
    fn test_outage_station_alias() {
        let json = r#"{"station": "Union Sq", "equipment_type": "ELEVATOR"}"#;
        let outage: Outage = serde_json::from_str(json).unwrap();
        assert_eq!(outage.station_name, "Union Sq");
        assert!(outage.trains.is_empty());
    }

    #[test]
    fn test_outage_kind_parse() {
        assert_eq!(OutageKind::parse("upcoming"), OutageKind::Upcoming);
        assert_eq!(OutageKind::parse("UPCOMING"), OutageKind::Upcoming);
        assert_eq!(OutageKind::parse("current"), OutageKind::Current);
        assert_eq!(OutageKind::parse("anything"), OutageKind::Current);
    }

    #[test]
    fn test_position_coordinates() {
        let full = Position { latitude: Some(40.7), longitude: Some(-74.0), bearing: None };
        assert_eq!(full.coordinates(), Some((40.7, -74.0)));

        let partial = Position { latitude: Some(40.7), longitude: None, bearing: None };
        assert_eq!(partial.coordinates(), None);
    }
}
