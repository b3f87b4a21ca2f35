//! Service alerts page: route/severity/search filters over normalized
//! alerts.

use std::collections::BTreeSet;

use askama::Template;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use transit_core::{route, NormalizedAlert, Severity};

use crate::error::Result;
use crate::format;
use crate::routes::RouteChip;
use crate::state::AppState;

/// Alert page filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsQuery {
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub q: String,
}

/// Alerts page template.
#[derive(Template)]
#[template(path = "alerts.html")]
pub struct AlertsTemplate {
    pub refresh_secs: u64,
    pub refresh_url: String,
    pub route_filter: String,
    pub severity_filter: String,
    pub search: String,
    pub route_options: Vec<RouteOption>,
    pub severities: Vec<SeverityOption>,
    pub alerts: Vec<AlertView>,
    pub total: usize,
}

/// A route filter option with its badge color and human label.
pub struct RouteOption {
    pub id: String,
    pub color: &'static str,
    pub label: String,
    pub selected: bool,
}

/// A severity filter option.
pub struct SeverityOption {
    pub value: &'static str,
    pub selected: bool,
}

/// One rendered alert card.
pub struct AlertView {
    pub id: String,
    pub header: String,
    pub description: String,
    pub severity: &'static str,
    pub severity_class: String,
    pub alert_type: String,
    pub effect: String,
    pub updated: String,
    pub routes: Vec<RouteChip>,
}

/// Render the alerts page.
pub async fn alerts_page(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Result<AlertsTemplate> {
    let alerts = state
        .client
        .normalized_alerts(some_nonempty(&query.route), some_nonempty(&query.severity))
        .await;

    // Options reflect the routes present in the fetched alerts.
    let route_options = route_options(&alerts, &query.route);
    let severities = severity_options(&query.severity);

    let filtered = apply_filters(alerts, &query.route, &query.q);
    let views: Vec<AlertView> = filtered.iter().map(alert_view).collect();

    Ok(AlertsTemplate {
        refresh_secs: 60,
        refresh_url: page_url(&query),
        route_filter: query.route,
        severity_filter: query.severity,
        search: query.q,
        route_options,
        severities,
        total: views.len(),
        alerts: views,
    })
}

/// Filtered, normalized alerts as JSON.
pub async fn alerts_api(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Json<Vec<NormalizedAlert>> {
    let alerts = state
        .client
        .normalized_alerts(some_nonempty(&query.route), some_nonempty(&query.severity))
        .await;
    Json(apply_filters(alerts, &query.route, &query.q))
}

fn some_nonempty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn page_url(query: &AlertsQuery) -> String {
    format!(
        "/alerts?route={}&severity={}&q={}",
        urlencoding::encode(&query.route),
        urlencoding::encode(&query.severity),
        urlencoding::encode(&query.q),
    )
}

/// Route membership and text search over already-normalized alerts.
/// Severity filtering happened upstream of this, against normalized
/// values.
fn apply_filters(alerts: Vec<NormalizedAlert>, route: &str, search: &str) -> Vec<NormalizedAlert> {
    let search = search.trim().to_lowercase();
    alerts
        .into_iter()
        .filter(|a| route.is_empty() || a.routes.iter().any(|r| r == route))
        .filter(|a| {
            search.is_empty()
                || a.header.to_lowercase().contains(&search)
                || a.description.to_lowercase().contains(&search)
        })
        .collect()
}

/// Distinct routes mentioned by the alerts, sorted, as filter options.
fn route_options(alerts: &[NormalizedAlert], current: &str) -> Vec<RouteOption> {
    let routes: BTreeSet<&String> = alerts.iter().flat_map(|a| a.routes.iter()).collect();
    routes
        .into_iter()
        .map(|r| RouteOption {
            id: r.clone(),
            color: route::color(r),
            label: route::label(r),
            selected: r == current,
        })
        .collect()
}

/// The three severity options; the current filter is matched the same
/// case-insensitive way the upstream query is.
fn severity_options(current: &str) -> Vec<SeverityOption> {
    Severity::all()
        .iter()
        .map(|s| SeverityOption {
            value: s.as_str(),
            selected: s.as_str().eq_ignore_ascii_case(current.trim()),
        })
        .collect()
}

fn alert_view(alert: &NormalizedAlert) -> AlertView {
    AlertView {
        id: alert.id.clone(),
        header: alert.header.clone(),
        description: alert.description.clone(),
        severity: alert.severity.as_str(),
        severity_class: alert.severity.as_str().to_lowercase(),
        alert_type: alert.alert_type.clone(),
        effect: alert.effect.clone(),
        updated: format::timestamp(alert.updated.as_ref()),
        routes: alert.routes.iter().map(|r| RouteChip::new(r)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_core::{normalize_alerts, RawAlert};

    fn alert(header: &str, routes: &[&str]) -> NormalizedAlert {
        normalize_alerts(vec![RawAlert {
            header: Some(header.to_string()),
            routes: routes.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }])
        .remove(0)
    }

    #[test]
    fn test_route_filter_uses_membership() {
        let alerts = vec![
            alert("Delays on the 4", &["4", "5"]),
            alert("M15 detour", &["M15"]),
        ];
        let filtered = apply_filters(alerts, "5", "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].header, "Delays on the 4");
    }

    #[test]
    fn test_search_matches_header_or_description() {
        let mut described = alert("Weekend notice", &["A"]);
        described.description = "Shuttle buses replace trains".to_string();
        let alerts = vec![described, alert("Delays on the 4", &["4"])];

        let filtered = apply_filters(alerts.clone(), "", "SHUTTLE");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].header, "Weekend notice");

        assert!(apply_filters(alerts, "", "nothing matches this").is_empty());
    }

    #[test]
    fn test_route_options_sorted_and_distinct() {
        let alerts = vec![
            alert("one", &["Q", "4"]),
            alert("two", &["4", "Bx12"]),
        ];
        let options = route_options(&alerts, "Bx12");
        let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "Bx12", "Q"]);
        assert_eq!(options[1].label, "Bus Bx12");
        // Only the current filter value is preselected.
        assert!(options[1].selected);
        assert!(!options[0].selected && !options[2].selected);
    }

    #[test]
    fn test_severity_options_track_filter_case_insensitively() {
        let options = severity_options("severe");
        assert_eq!(options.len(), 3);
        assert!(options.iter().any(|o| o.value == "SEVERE" && o.selected));
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);

        assert!(severity_options("").iter().all(|o| !o.selected));
    }
}
