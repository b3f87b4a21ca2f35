//! Vehicle tracking page: map and list views with line-group and route
//! filters, refreshed every 15 seconds.

use std::collections::BTreeSet;

use askama::Template;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use transit_api::Vehicle;
use transit_core::route::{self, LineGroup, RouteKind, LINE_GROUPS};

use crate::error::Result;
use crate::format;
use crate::routes::{Pagination, SelectOption};
use crate::state::AppState;

/// List view page size.
const LIST_PER_PAGE: usize = 20;

/// Vehicle page filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehiclesQuery {
    #[serde(default)]
    pub line: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub page: Option<usize>,
}

/// Vehicles page template.
#[derive(Template)]
#[template(path = "vehicles.html")]
pub struct VehiclesTemplate {
    pub refresh_secs: u64,
    pub refresh_url: String,
    pub line_filter: String,
    pub route_filter: String,
    pub map_view: bool,
    pub line_groups: Vec<LineGroupOption>,
    pub available_routes: Vec<SelectOption>,
    pub total: usize,
    pub rows: Vec<VehicleView>,
    pub pagination: Pagination,
    /// Marker data for the map view, embedded as JSON.
    pub markers_json: String,
}

/// A line group dropdown entry.
pub struct LineGroupOption {
    pub id: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

/// One rendered vehicle card.
pub struct VehicleView {
    pub route_id: String,
    pub color: &'static str,
    pub is_bus: bool,
    pub trip_id: String,
    pub vehicle_id: String,
    pub status: String,
    pub position: String,
    pub updated: String,
}

/// Map marker payload.
#[derive(Serialize)]
struct Marker {
    route: String,
    color: &'static str,
    bus: bool,
    lat: f64,
    lon: f64,
    trip: String,
    vehicle: String,
    status: String,
    updated: String,
}

/// Render the vehicles page.
pub async fn vehicles_page(
    State(state): State<AppState>,
    Query(query): Query<VehiclesQuery>,
) -> Result<VehiclesTemplate> {
    let group = route::line_group(&query.line);
    let vehicles = fetch_vehicles(&state, &query, group).await;
    debug!(count = vehicles.len(), line = %query.line, route = %query.route, "Fetched vehicles");

    let filtered = filter_vehicles(vehicles, group, &query.route);
    let available_routes = distinct_routes(&filtered, &query.route);
    let line_groups = line_group_options(&query.line);
    let total = filtered.len();

    let markers_json = serde_json::to_string(&markers(&filtered)).unwrap_or_else(|_| "[]".into());

    let map_view = query.view != "list";
    let (window, pagination) = if map_view {
        Pagination::paginate(Vec::new(), 1, LIST_PER_PAGE)
    } else {
        Pagination::paginate(filtered, query.page.unwrap_or(1), LIST_PER_PAGE)
    };

    Ok(VehiclesTemplate {
        refresh_secs: 15,
        refresh_url: page_url(&query),
        line_filter: query.line,
        route_filter: query.route,
        map_view,
        line_groups,
        available_routes,
        total,
        rows: window.iter().map(vehicle_view).collect(),
        pagination,
        markers_json,
    })
}

/// Filtered vehicle positions as JSON.
pub async fn vehicles_api(
    State(state): State<AppState>,
    Query(query): Query<VehiclesQuery>,
) -> Json<Vec<Vehicle>> {
    let group = route::line_group(&query.line);
    let vehicles = fetch_vehicles(&state, &query, group).await;
    Json(filter_vehicles(vehicles, group, &query.route))
}

/// Fetch with the narrowest server-side filter available: exact route if
/// selected, otherwise the bus family `route_type` for the pseudo-groups.
async fn fetch_vehicles(
    state: &AppState,
    query: &VehiclesQuery,
    group: Option<&'static LineGroup>,
) -> Vec<Vehicle> {
    let route_id = (!query.route.is_empty()).then_some(query.route.as_str());
    let route_type = match route_id {
        Some(_) => None,
        None => group.and_then(|g| g.route_type_param()),
    };
    state.client.vehicles_or_default(route_id, route_type).await
}

/// Refine server results by group membership and exact route.
fn filter_vehicles(
    vehicles: Vec<Vehicle>,
    group: Option<&LineGroup>,
    route: &str,
) -> Vec<Vehicle> {
    vehicles
        .into_iter()
        .filter(|v| route.is_empty() || v.route_id == route)
        .filter(|v| group.map_or(true, |g| g.contains(&v.route_id)))
        .collect()
}

/// Distinct route ids present in the data, sorted, for the route
/// dropdown.
fn distinct_routes(vehicles: &[Vehicle], current: &str) -> Vec<SelectOption> {
    let routes: BTreeSet<&str> = vehicles
        .iter()
        .map(|v| v.route_id.as_str())
        .filter(|r| !r.is_empty())
        .collect();
    routes
        .into_iter()
        .map(|r| SelectOption::new(r, current))
        .collect()
}

fn line_group_options(current: &str) -> Vec<LineGroupOption> {
    LINE_GROUPS
        .iter()
        .map(|g| LineGroupOption {
            id: g.id,
            name: g.name,
            selected: g.id == current,
        })
        .collect()
}

fn page_url(query: &VehiclesQuery) -> String {
    format!(
        "/vehicles?line={}&route={}&view={}&page={}",
        urlencoding::encode(&query.line),
        urlencoding::encode(&query.route),
        urlencoding::encode(&query.view),
        query.page.unwrap_or(1),
    )
}

fn updated_label(timestamp: i64) -> String {
    if timestamp == 0 {
        "N/A".to_string()
    } else {
        format::timestamp(Some(&transit_core::Timestamp::Unix(timestamp)))
    }
}

fn status_line(vehicle: &Vehicle) -> String {
    match vehicle.stop_id.as_deref() {
        Some(stop) if !stop.is_empty() => format!("{} {stop}", vehicle.status()),
        _ => vehicle.status().to_string(),
    }
}

fn vehicle_view(vehicle: &Vehicle) -> VehicleView {
    let position = vehicle
        .position
        .and_then(|p| p.coordinates())
        .map(|(lat, lon)| format!("{lat:.5}, {lon:.5}"))
        .unwrap_or_else(|| "N/A".to_string());

    VehicleView {
        color: route::color(&vehicle.route_id),
        is_bus: RouteKind::classify(&vehicle.route_id).is_bus(),
        route_id: vehicle.route_id.clone(),
        trip_id: vehicle.trip_id.clone(),
        vehicle_id: vehicle
            .vehicle_id
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        status: status_line(vehicle),
        position,
        updated: updated_label(vehicle.timestamp),
    }
}

/// Vehicles with coordinates, shaped for the map script.
fn markers(vehicles: &[Vehicle]) -> Vec<Marker> {
    vehicles
        .iter()
        .filter_map(|v| {
            let (lat, lon) = v.position?.coordinates()?;
            Some(Marker {
                route: v.route_id.clone(),
                color: route::color(&v.route_id),
                bus: RouteKind::classify(&v.route_id).is_bus(),
                lat,
                lon,
                trip: v.trip_id.clone(),
                vehicle: v.vehicle_id.clone().unwrap_or_else(|| "N/A".to_string()),
                status: status_line(v),
                updated: updated_label(v.timestamp),
            })
        })
        .collect()
}
