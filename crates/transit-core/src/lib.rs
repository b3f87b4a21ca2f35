//! Domain types and classification for the transit dashboard.
//!
//! This crate holds the pure, I/O-free pieces shared by the API client and
//! the web dashboard:
//!
//! - [`RawAlert`] / [`NormalizedAlert`] - upstream alert records and their
//!   normalized form with every field populated
//! - [`Severity`] - three-valued alert urgency with text-heuristic fallback
//! - [`route`] - the canonical route taxonomy: family classification,
//!   display colors, and labels, all derived from one table
//!
//! # Example
//!
//! ```rust
//! use transit_core::{normalize_alerts, RawAlert, Severity};
//!
//! let raw = RawAlert {
//!     header: Some("Service Suspended on 4 train".to_string()),
//!     routes: vec!["4".to_string()],
//!     ..Default::default()
//! };
//!
//! let alerts = normalize_alerts(vec![raw]);
//! assert_eq!(alerts[0].severity, Severity::Severe);
//! assert_eq!(alerts[0].effect, "Suspended");
//! assert_eq!(alerts[0].route_colors["4"], "#00933C");
//! ```

mod alert;
pub mod route;
mod severity;

pub use alert::{filter_by_severity, normalize_alert, normalize_alerts, NormalizedAlert, RawAlert, Timestamp};
pub use severity::Severity;
