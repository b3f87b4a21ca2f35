//! Elevator & escalator outages page: current/upcoming tabs, filters,
//! null-safe column sorting, and pagination.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use askama::Template;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use transit_api::{Outage, OutageKind};

use crate::error::Result;
use crate::format;
use crate::routes::{Pagination, SelectOption};
use crate::state::AppState;

/// Allowed page sizes; anything else falls back to the first.
const PAGE_SIZES: &[usize] = &[10, 25, 50];

/// Outage page filters and table state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutagesQuery {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub station: String,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub order: String,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

impl OutagesQuery {
    fn kind(&self) -> OutageKind {
        OutageKind::parse(&self.kind)
    }

    fn column(&self) -> SortColumn {
        SortColumn::parse(&self.sort)
    }

    fn ascending(&self) -> bool {
        !self.order.eq_ignore_ascii_case("desc")
    }

    fn per_page(&self) -> usize {
        match self.per_page {
            Some(n) if PAGE_SIZES.contains(&n) => n,
            _ => PAGE_SIZES[0],
        }
    }
}

/// Sortable columns of the outage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Station,
    EquipmentType,
    Serving,
    Reason,
    OutageStart,
    OutageEnd,
}

impl SortColumn {
    pub fn parse(value: &str) -> Self {
        match value {
            "equipment_type" => Self::EquipmentType,
            "serving" => Self::Serving,
            "reason" => Self::Reason,
            "outage_start" => Self::OutageStart,
            "outage_end" => Self::OutageEnd,
            _ => Self::Station,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Station => "station_name",
            Self::EquipmentType => "equipment_type",
            Self::Serving => "serving",
            Self::Reason => "reason",
            Self::OutageStart => "outage_start",
            Self::OutageEnd => "outage_end",
        }
    }
}

/// Outages page template.
#[derive(Template)]
#[template(path = "elevators.html")]
pub struct ElevatorsTemplate {
    pub refresh_secs: u64,
    pub refresh_url: String,
    pub upcoming: bool,
    pub equipment_filter: String,
    pub search: String,
    pub stations: Vec<SelectOption>,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<OutageView>,
    pub pagination: Pagination,
    pub per_page_options: Vec<PerPageOption>,
}

/// A sortable table header with its toggle link.
pub struct ColumnHeader {
    pub label: &'static str,
    pub url: String,
    pub active: bool,
    pub ascending: bool,
}

/// A page-size link.
pub struct PerPageOption {
    pub size: usize,
    pub url: String,
    pub active: bool,
}

/// One rendered outage row.
pub struct OutageView {
    pub station: String,
    pub equipment_type: String,
    pub serving: String,
    pub reason: String,
    pub start: String,
    pub end: String,
    pub status: &'static str,
    pub trains: Vec<String>,
}

/// Render the outages page.
pub async fn elevators_page(
    State(state): State<AppState>,
    Query(query): Query<OutagesQuery>,
) -> Result<ElevatorsTemplate> {
    let outages = state
        .client
        .elevator_outages_or_default(query.kind(), some_nonempty(&query.station))
        .await;

    // Station options reflect everything fetched, before local filters.
    let stations = distinct_stations(&outages, &query.station);

    let mut filtered = apply_filters(outages, &query.equipment, &query.q);
    sort_outages(&mut filtered, query.column(), query.ascending());

    let (window, pagination) =
        Pagination::paginate(filtered, query.page.unwrap_or(1), query.per_page());

    let status = match query.kind() {
        OutageKind::Current => "Active",
        OutageKind::Upcoming => "Upcoming",
    };

    Ok(ElevatorsTemplate {
        refresh_secs: 60,
        refresh_url: page_url(&query, query.column(), query.ascending(), query.per_page()),
        upcoming: query.kind() == OutageKind::Upcoming,
        columns: column_headers(&query),
        per_page_options: per_page_options(&query),
        stations,
        rows: window.iter().map(|o| outage_view(o, status)).collect(),
        pagination,
        equipment_filter: query.equipment,
        search: query.q,
    })
}

/// Filtered, sorted outages as JSON.
pub async fn outages_api(
    State(state): State<AppState>,
    Query(query): Query<OutagesQuery>,
) -> Json<Vec<Outage>> {
    let outages = state
        .client
        .elevator_outages_or_default(query.kind(), some_nonempty(&query.station))
        .await;
    let mut filtered = apply_filters(outages, &query.equipment, &query.q);
    sort_outages(&mut filtered, query.column(), query.ascending());
    Json(filtered)
}

fn some_nonempty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Equipment-type and text-search filters.
fn apply_filters(outages: Vec<Outage>, equipment: &str, search: &str) -> Vec<Outage> {
    let search = search.trim().to_lowercase();
    outages
        .into_iter()
        .filter(|o| equipment.is_empty() || o.equipment_type == equipment)
        .filter(|o| {
            search.is_empty()
                || o.station_name.to_lowercase().contains(&search)
                || o.serving.to_lowercase().contains(&search)
                || o.reason.to_lowercase().contains(&search)
        })
        .collect()
}

/// Sort with missing values ordered last in both directions. String
/// columns compare case-insensitively; date columns compare parsed
/// timestamps, so an unparseable date sorts with the missing ones.
fn sort_outages(outages: &mut [Outage], column: SortColumn, ascending: bool) {
    outages.sort_by(|a, b| match column {
        SortColumn::Station => str_cmp(&a.station_name, &b.station_name, ascending),
        SortColumn::EquipmentType => str_cmp(&a.equipment_type, &b.equipment_type, ascending),
        SortColumn::Serving => str_cmp(&a.serving, &b.serving, ascending),
        SortColumn::Reason => str_cmp(&a.reason, &b.reason, ascending),
        SortColumn::OutageStart => {
            date_cmp(date_key(&a.outage_start), date_key(&b.outage_start), ascending)
        }
        SortColumn::OutageEnd => {
            date_cmp(date_key(&a.outage_end), date_key(&b.outage_end), ascending)
        }
    });
}

fn date_key(value: &Option<String>) -> Option<DateTime<Utc>> {
    value.as_deref().and_then(format::parse_date_str)
}

fn str_cmp(a: &str, b: &str, ascending: bool) -> Ordering {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    if ascending {
        a.cmp(&b)
    } else {
        b.cmp(&a)
    }
}

fn date_cmp(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>, ascending: bool) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        // Missing values go last regardless of direction.
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            if ascending {
                a.cmp(&b)
            } else {
                b.cmp(&a)
            }
        }
    }
}

/// Distinct station names, sorted, for the station dropdown.
fn distinct_stations(outages: &[Outage], current: &str) -> Vec<SelectOption> {
    let stations: BTreeSet<&str> = outages
        .iter()
        .map(|o| o.station_name.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    stations
        .into_iter()
        .map(|s| SelectOption::new(s, current))
        .collect()
}

fn page_url(query: &OutagesQuery, column: SortColumn, ascending: bool, per_page: usize) -> String {
    format!(
        "/elevators?type={}&equipment={}&station={}&q={}&sort={}&order={}&per_page={}",
        query.kind().as_param(),
        urlencoding::encode(&query.equipment),
        urlencoding::encode(&query.station),
        urlencoding::encode(&query.q),
        column.id(),
        if ascending { "asc" } else { "desc" },
        per_page,
    )
}

/// Headers with links that sort by the column, toggling direction on the
/// active one.
fn column_headers(query: &OutagesQuery) -> Vec<ColumnHeader> {
    const COLUMNS: &[(SortColumn, &str)] = &[
        (SortColumn::Station, "Station"),
        (SortColumn::EquipmentType, "Type"),
        (SortColumn::Serving, "Serving"),
        (SortColumn::Reason, "Reason"),
        (SortColumn::OutageStart, "Start Date"),
        (SortColumn::OutageEnd, "End Date"),
    ];

    let active = query.column();
    let ascending = query.ascending();

    COLUMNS
        .iter()
        .map(|&(column, label)| {
            let next_ascending = if column == active { !ascending } else { true };
            ColumnHeader {
                label,
                url: page_url(query, column, next_ascending, query.per_page()),
                active: column == active,
                ascending,
            }
        })
        .collect()
}

fn per_page_options(query: &OutagesQuery) -> Vec<PerPageOption> {
    PAGE_SIZES
        .iter()
        .map(|&size| PerPageOption {
            size,
            url: page_url(query, query.column(), query.ascending(), size),
            active: size == query.per_page(),
        })
        .collect()
}

fn outage_view(outage: &Outage, status: &'static str) -> OutageView {
    OutageView {
        station: outage.station_name.clone(),
        equipment_type: outage.equipment_type.clone(),
        serving: outage.serving.clone(),
        reason: outage.reason.clone(),
        start: format::date(outage.outage_start.as_deref()),
        end: format::date(outage.outage_end.as_deref()),
        status,
        trains: outage.trains.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outage(station: &str, equipment: &str, end: Option<&str>) -> Outage {
        Outage {
            station_name: station.to_string(),
            equipment_type: equipment.to_string(),
            serving: "Mezzanine to platform".to_string(),
            reason: "Capital Replacement".to_string(),
            outage_end: end.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_equipment_filter() {
        let outages = vec![
            outage("Union Sq", "ELEVATOR", None),
            outage("Atlantic Av", "ESCALATOR", None),
        ];
        let filtered = apply_filters(outages, "ESCALATOR", "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].station_name, "Atlantic Av");
    }

    #[test]
    fn test_search_covers_station_serving_reason() {
        let outages = vec![
            outage("Union Sq", "ELEVATOR", None),
            outage("Atlantic Av", "ESCALATOR", None),
        ];
        assert_eq!(apply_filters(outages.clone(), "", "union").len(), 1);
        // "mezzanine" appears in every serving description.
        assert_eq!(apply_filters(outages.clone(), "", "MEZZANINE").len(), 2);
        assert_eq!(apply_filters(outages, "", "no match").len(), 0);
    }

    #[test]
    fn test_string_sort_case_insensitive() {
        let mut outages = vec![
            outage("union Sq", "ELEVATOR", None),
            outage("Atlantic Av", "ELEVATOR", None),
        ];
        sort_outages(&mut outages, SortColumn::Station, true);
        assert_eq!(outages[0].station_name, "Atlantic Av");

        sort_outages(&mut outages, SortColumn::Station, false);
        assert_eq!(outages[0].station_name, "union Sq");
    }

    #[test]
    fn test_missing_dates_sort_last_both_directions() {
        let mut outages = vec![
            outage("A", "ELEVATOR", None),
            outage("B", "ELEVATOR", Some("2025-06-01 08:00:00")),
            outage("C", "ELEVATOR", Some("2025-05-01 08:00:00")),
            outage("D", "ELEVATOR", Some("not a date")),
        ];

        sort_outages(&mut outages, SortColumn::OutageEnd, true);
        let asc: Vec<&str> = outages.iter().map(|o| o.station_name.as_str()).collect();
        assert_eq!(&asc[..2], &["C", "B"]);
        // Missing and unparseable dates trail the real ones.
        assert!(asc[2..].contains(&"A") && asc[2..].contains(&"D"));

        sort_outages(&mut outages, SortColumn::OutageEnd, false);
        let desc: Vec<&str> = outages.iter().map(|o| o.station_name.as_str()).collect();
        assert_eq!(&desc[..2], &["B", "C"]);
        assert!(desc[2..].contains(&"A") && desc[2..].contains(&"D"));
    }

    #[test]
    fn test_sort_column_parse_round_trips() {
        for column in [
            SortColumn::Station,
            SortColumn::EquipmentType,
            SortColumn::Serving,
            SortColumn::Reason,
            SortColumn::OutageStart,
            SortColumn::OutageEnd,
        ] {
            assert_eq!(SortColumn::parse(column.id()), column);
        }
        assert_eq!(SortColumn::parse("bogus"), SortColumn::Station);
    }

    #[test]
    fn test_per_page_clamps_to_allowed_sizes() {
        let mut query = OutagesQuery::default();
        assert_eq!(query.per_page(), 10);
        query.per_page = Some(25);
        assert_eq!(query.per_page(), 25);
        query.per_page = Some(999);
        assert_eq!(query.per_page(), 10);
    }

    #[test]
    fn test_distinct_stations() {
        let outages = vec![
            outage("Union Sq", "ELEVATOR", None),
            outage("Atlantic Av", "ELEVATOR", None),
            outage("Union Sq", "ESCALATOR", None),
        ];
        let options = distinct_stations(&outages, "Union Sq");
        let names: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(names, vec!["Atlantic Av", "Union Sq"]);
        assert!(!options[0].selected);
        assert!(options[1].selected);
    }
}
