//! Alert records and the normalization pipeline.
//!
//! Upstream alert records arrive with inconsistent field names and gaps:
//! `header` vs `header_text`, absent severities, `"N/A"` placeholders.
//! Normalization maps each raw record to a [`NormalizedAlert`] with every
//! field populated, filling gaps from keyword tables. It never fails; the
//! output list is the same length and order as the input.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::route;
use crate::severity::Severity;

/// An upstream timestamp, which the API emits either as a unix number or
/// a date string depending on the record type. Carried through as-is and
/// only interpreted at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Unix(i64),
    Text(String),
}

/// An alert record as the upstream API returns it. Everything except the
/// id is optional or inconsistently named.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlert {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "header_text")]
    pub header: Option<String>,
    #[serde(default, alias = "description_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default, alias = "affected_routes")]
    pub routes: Vec<String>,
    #[serde(default, alias = "updated_at")]
    pub updated: Option<Timestamp>,
}

/// An alert with every field populated. `severity` is always one of the
/// three known values and `route_colors` has one entry per route, in
/// route order.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedAlert {
    pub id: String,
    pub header: String,
    pub description: String,
    pub severity: Severity,
    pub alert_type: String,
    pub effect: String,
    pub updated: Option<Timestamp>,
    pub routes: Vec<String>,
    pub route_colors: IndexMap<String, &'static str>,
}

/// One row of a keyword table: the first rule whose keywords match the
/// header wins; rules are never combined.
struct KeywordRule {
    keywords: &'static [&'static str],
    /// When set, every keyword must be present rather than any one.
    require_all: bool,
    label: &'static str,
}

/// Alert-type labels by header keyword, in precedence order.
const ALERT_TYPE_RULES: &[KeywordRule] = &[
    KeywordRule { keywords: &["delay"], require_all: false, label: "Delay" },
    KeywordRule { keywords: &["detour"], require_all: false, label: "Detour" },
    KeywordRule { keywords: &["suspend"], require_all: false, label: "Suspension" },
    KeywordRule { keywords: &["work", "maintenance"], require_all: false, label: "Planned Work" },
];

const DEFAULT_ALERT_TYPE: &str = "Service Change";

/// Effect labels by header keyword, in precedence order.
const EFFECT_RULES: &[KeywordRule] = &[
    KeywordRule { keywords: &["delay"], require_all: false, label: "Delays" },
    KeywordRule { keywords: &["skip"], require_all: false, label: "Skip-Stop" },
    KeywordRule { keywords: &["local", "express"], require_all: true, label: "Local to Express" },
    KeywordRule { keywords: &["suspend"], require_all: false, label: "Suspended" },
    KeywordRule { keywords: &["reduce"], require_all: false, label: "Reduced Service" },
];

const DEFAULT_EFFECT: &str = "Modified Service";

/// Whether an upstream classification field counts as missing.
fn is_placeholder(value: &Option<String>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_empty() || v == "N/A",
    }
}

fn first_match(rules: &[KeywordRule], text: &str, default: &'static str) -> &'static str {
    for rule in rules {
        let hit = if rule.require_all {
            rule.keywords.iter().all(|k| text.contains(k))
        } else {
            rule.keywords.iter().any(|k| text.contains(k))
        };
        if hit {
            return rule.label;
        }
    }
    default
}

/// Normalize a single upstream alert. Infallible: every gap is filled
/// from the keyword tables or a default.
pub fn normalize_alert(raw: RawAlert) -> NormalizedAlert {
    let header = raw.header.unwrap_or_default();
    let description = raw.description.unwrap_or_default();
    let header_lower = header.to_lowercase();

    // A severity that is already one of the three known values is used
    // as-is; anything else (absent, "UNKNOWN", garbage) is classified
    // from the combined header and description text.
    let severity = raw
        .severity
        .as_deref()
        .and_then(Severity::parse)
        .unwrap_or_else(|| {
            Severity::classify_text(&format!("{header_lower} {}", description.to_lowercase()))
        });

    let alert_type = if is_placeholder(&raw.alert_type) {
        first_match(ALERT_TYPE_RULES, &header_lower, DEFAULT_ALERT_TYPE).to_string()
    } else {
        raw.alert_type.unwrap_or_default()
    };

    let effect = if is_placeholder(&raw.effect) {
        first_match(EFFECT_RULES, &header_lower, DEFAULT_EFFECT).to_string()
    } else {
        raw.effect.unwrap_or_default()
    };

    let route_colors = raw
        .routes
        .iter()
        .map(|r| (r.clone(), route::color(r)))
        .collect();

    NormalizedAlert {
        id: raw.id,
        header,
        description,
        severity,
        alert_type,
        effect,
        updated: raw.updated,
        routes: raw.routes,
        route_colors,
    }
}

/// Normalize a batch of alerts, preserving length and order.
pub fn normalize_alerts(raw: Vec<RawAlert>) -> Vec<NormalizedAlert> {
    raw.into_iter().map(normalize_alert).collect()
}

/// Retain only alerts whose *normalized* severity matches the filter.
/// The filter value is matched case-insensitively; a blank filter keeps
/// everything. Filtering on raw severity instead would silently drop
/// alerts the normalizer classifies from text.
pub fn filter_by_severity(alerts: Vec<NormalizedAlert>, severity: &str) -> Vec<NormalizedAlert> {
    let severity = severity.trim();
    if severity.is_empty() {
        return alerts;
    }
    match Severity::parse(severity) {
        Some(wanted) => alerts.into_iter().filter(|a| a.severity == wanted).collect(),
        // An unknown filter value matches nothing rather than everything.
        None => Vec::new(),
    }
}
