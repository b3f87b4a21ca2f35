//! Overview page: summary stat cards, route activity chart, recent alerts
//! and outages.

use askama::Template;
use axum::extract::State;
use axum::Json;
use tracing::error;
use transit_api::{OutageKind, RouteStat, SummaryStats};
use transit_core::{route, NormalizedAlert};

use crate::error::Result;
use crate::format;
use crate::routes::RouteChip;
use crate::state::AppState;

/// How many routes the activity chart shows.
const CHART_TOP_N: usize = 10;

/// How many recent alerts/outages the overview lists.
const RECENT_N: usize = 5;

/// Overview page template.
#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub refresh_secs: u64,
    pub refresh_url: String,
    /// Terminal load failure: summary could not be fetched at all.
    pub load_error: bool,
    pub active_vehicles: u64,
    pub active_alerts: u64,
    pub current_outages: u64,
    pub upcoming_outages: u64,
    pub chart: Vec<ChartBar>,
    pub recent_alerts: Vec<AlertSummary>,
    pub recent_outages: Vec<OutageSummary>,
}

/// One bar of the route activity chart.
pub struct ChartBar {
    pub label: String,
    pub count: u64,
    pub color: &'static str,
    /// Bar width relative to the busiest route, 0-100.
    pub percent: u64,
}

/// A condensed alert row.
pub struct AlertSummary {
    pub header: String,
    pub severity: &'static str,
    pub severity_class: String,
    pub updated: String,
    pub routes: Vec<RouteChip>,
}

/// A condensed outage row.
pub struct OutageSummary {
    pub station: String,
    pub equipment_type: String,
    pub serving: String,
}

/// Render the overview page.
///
/// The summary fetch is the one place a failure is surfaced: the page
/// renders with zeroed cards and a visible error banner. Everything else
/// degrades silently to empty sections.
pub async fn overview_page(State(state): State<AppState>) -> Result<OverviewTemplate> {
    let (summary, load_error) = match state.client.summary_stats().await {
        Ok(summary) => (summary, false),
        Err(err) => {
            error!(error = %err, "Failed to load dashboard summary");
            (SummaryStats::default(), true)
        }
    };

    let (route_stats, alerts, outages) = tokio::join!(
        state.client.route_stats_or_default(),
        state.client.normalized_alerts(None, None),
        state
            .client
            .elevator_outages_or_default(OutageKind::Current, None),
    );

    let recent_alerts = alerts.iter().take(RECENT_N).map(alert_summary).collect();
    let recent_outages = outages
        .into_iter()
        .take(RECENT_N)
        .map(|o| OutageSummary {
            station: o.station_name,
            equipment_type: o.equipment_type,
            serving: o.serving,
        })
        .collect();

    Ok(OverviewTemplate {
        refresh_secs: 60,
        refresh_url: "/".to_string(),
        load_error,
        active_vehicles: summary.active_vehicles,
        active_alerts: summary.active_alerts,
        current_outages: summary.elevator_escalator_stats.active_outages,
        upcoming_outages: summary.elevator_escalator_stats.upcoming_outages,
        chart: chart_bars(route_stats),
        recent_alerts,
        recent_outages,
    })
}

/// Warm summary snapshot as JSON, served from the background poller.
pub async fn stats_api(State(state): State<AppState>) -> Json<SummaryStats> {
    Json(state.summary.latest())
}

fn alert_summary(alert: &NormalizedAlert) -> AlertSummary {
    AlertSummary {
        header: alert.header.clone(),
        severity: alert.severity.as_str(),
        severity_class: alert.severity.as_str().to_lowercase(),
        updated: format::timestamp(alert.updated.as_ref()),
        routes: alert.routes.iter().map(|r| RouteChip::new(r)).collect(),
    }
}

/// Top routes by active vehicle count, busiest first.
fn chart_bars(mut stats: Vec<RouteStat>) -> Vec<ChartBar> {
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats.truncate(CHART_TOP_N);

    let max = stats.first().map_or(0, |s| s.count).max(1);
    stats
        .into_iter()
        .map(|stat| {
            let label = stat.display_name();
            ChartBar {
                color: route::color(&stat.id),
                percent: stat.count * 100 / max,
                count: stat.count,
                label,
            }
        })
        .collect()
}
