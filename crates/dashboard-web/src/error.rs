//! Error types for the dashboard.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Errors that can surface from a page handler.
///
/// Data-fetch failures are absorbed before they get here (the client
/// degrades to defaults); what remains is render-time failure, which maps
/// to a generic notice rather than a stack trace.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Upstream API error that a page chose to surface.
    #[error("Upstream API error: {0}")]
    Api(#[from] transit_api::ApiError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let body = Html(
            "<!doctype html><html><head><title>Transit Pulse</title></head>\
             <body><h1>Something went wrong</h1>\
             <p>The dashboard hit an unexpected error. Try reloading the page.</p>\
             </body></html>",
        );

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type for dashboard handlers.
pub type Result<T> = std::result::Result<T, DashboardError>;
