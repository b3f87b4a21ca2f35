//! Timestamp parsing and display.
//!
//! Upstream timestamps arrive as unix numbers (seconds or milliseconds),
//! RFC 3339 strings, or naive date strings depending on the record type.
//! Parsing is lenient and display never fails: missing values render as
//! `N/A`, unparseable ones as `Invalid date`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use transit_core::Timestamp;

/// Unix values above this are taken as milliseconds rather than seconds.
const MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// Parse an upstream timestamp into UTC.
pub fn parse_timestamp(ts: &Timestamp) -> Option<DateTime<Utc>> {
    match ts {
        Timestamp::Unix(n) => {
            if *n > MILLIS_THRESHOLD {
                Utc.timestamp_millis_opt(*n).single()
            } else {
                Utc.timestamp_opt(*n, 0).single()
            }
        }
        Timestamp::Text(s) => parse_date_str(s),
    }
}

/// Parse a date string: RFC 3339 first, then the naive forms the
/// upstream's serializer emits.
pub fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Render a moment relative to `now`, e.g. `5 minutes ago` or `in 2 hours`.
pub fn relative_from(dt: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(dt);
    let future = delta.num_seconds() < 0;
    let secs = delta.num_seconds().abs();

    let phrase = if secs < 60 {
        "a few seconds".to_string()
    } else if secs < 3_600 {
        let minutes = secs / 60;
        if minutes == 1 {
            "a minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else if secs < 86_400 {
        let hours = secs / 3_600;
        if hours == 1 {
            "an hour".to_string()
        } else {
            format!("{hours} hours")
        }
    } else {
        let days = secs / 86_400;
        if days == 1 {
            "a day".to_string()
        } else {
            format!("{days} days")
        }
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

/// Display an optional upstream timestamp as a relative moment.
pub fn timestamp(ts: Option<&Timestamp>) -> String {
    match ts {
        None => "N/A".to_string(),
        Some(ts) => match parse_timestamp(ts) {
            Some(dt) => relative_from(dt, Utc::now()),
            None => "Invalid date".to_string(),
        },
    }
}

/// Display an optional date string as an absolute date.
pub fn date(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => "N/A".to_string(),
        Some(s) => match parse_date_str(s) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => "Invalid date".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_unix_seconds_vs_milliseconds() {
        let from_secs = parse_timestamp(&Timestamp::Unix(1_715_400_000)).unwrap();
        let from_millis = parse_timestamp(&Timestamp::Unix(1_715_400_000_000)).unwrap();
        assert_eq!(from_secs, from_millis);
    }

    #[test]
    fn test_parse_date_forms() {
        assert!(parse_date_str("2025-05-10T23:46:23Z").is_some());
        assert!(parse_date_str("2025-05-10T23:46:23.123456").is_some());
        assert!(parse_date_str("2025-05-10 23:46:23").is_some());
        assert!(parse_date_str("2025-05-10").is_some());
        assert!(parse_date_str("next tuesday").is_none());
        assert!(parse_date_str("").is_none());
    }

    #[test]
    fn test_relative_past() {
        let now = at(10_000);
        assert_eq!(relative_from(at(9_990), now), "a few seconds ago");
        assert_eq!(relative_from(at(10_000 - 300), now), "5 minutes ago");
        assert_eq!(relative_from(at(10_000 - 3_600), now), "an hour ago");
        assert_eq!(relative_from(at(10_000 - 3 * 86_400), now), "3 days ago");
    }

    #[test]
    fn test_relative_future() {
        let now = at(10_000);
        assert_eq!(relative_from(at(10_000 + 7_200), now), "in 2 hours");
    }

    #[test]
    fn test_display_fallbacks() {
        assert_eq!(timestamp(None), "N/A");
        assert_eq!(
            timestamp(Some(&Timestamp::Text("garbage".to_string()))),
            "Invalid date"
        );
        assert_eq!(date(None), "N/A");
        assert_eq!(date(Some("   ")), "N/A");
        assert_eq!(date(Some("garbage")), "Invalid date");
        assert_eq!(date(Some("2025-05-10 23:46:23")), "2025-05-10 23:46");
    }
}
