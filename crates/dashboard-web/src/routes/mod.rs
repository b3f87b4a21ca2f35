//! Route handlers for the dashboard.

pub mod alerts;
pub mod elevators;
pub mod health;
pub mod overview;
pub mod vehicles;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(overview::overview_page))
        .route("/vehicles", get(vehicles::vehicles_page))
        .route("/alerts", get(alerts::alerts_page))
        .route("/elevators", get(elevators::elevators_page))
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/stats", get(overview::stats_api))
        .route("/api/vehicles", get(vehicles::vehicles_api))
        .route("/api/alerts", get(alerts::alerts_api))
        .route("/api/elevators", get(elevators::outages_api))
}

/// A colored route badge, shared by several pages.
#[derive(Debug, Clone)]
pub struct RouteChip {
    pub id: String,
    pub color: &'static str,
}

impl RouteChip {
    pub fn new(route: &str) -> Self {
        Self {
            id: route.to_string(),
            color: transit_core::route::color(route),
        }
    }
}

/// A plain dropdown option, marked selected when it matches the current
/// filter value.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, current: &str) -> Self {
        let value = value.into();
        Self {
            selected: value == current,
            value,
        }
    }
}

/// Page window over a filtered list.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Slice one page out of `items`. Pages are 1-based and out-of-range
    /// requests clamp to the nearest valid page.
    pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> (Vec<T>, Pagination) {
        let per_page = per_page.max(1);
        let total = items.len();
        let total_pages = total.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * per_page;
        let window = items.into_iter().skip(start).take(per_page).collect();

        (
            window,
            Pagination {
                page,
                per_page,
                total,
                total_pages,
            },
        )
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> usize {
        (self.page + 1).min(self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_windows() {
        let items: Vec<u32> = (1..=25).collect();
        let (window, meta) = Pagination::paginate(items.clone(), 1, 10);
        assert_eq!(window, (1..=10).collect::<Vec<_>>());
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_prev());
        assert!(meta.has_next());

        let (window, meta) = Pagination::paginate(items.clone(), 3, 10);
        assert_eq!(window, (21..=25).collect::<Vec<_>>());
        assert!(!meta.has_next());

        // Out-of-range pages clamp rather than producing an empty window.
        let (window, meta) = Pagination::paginate(items, 99, 10);
        assert_eq!(meta.page, 3);
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn test_paginate_empty() {
        let (window, meta) = Pagination::paginate(Vec::<u32>::new(), 1, 10);
        assert!(window.is_empty());
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_prev());
        assert!(!meta.has_next());
    }
}
