//! Live transit dashboard.
//!
//! Server-rendered pages (HTMX polling + askama templates) over the
//! upstream transit REST API: overview stats, vehicle positions, service
//! alerts, and elevator/escalator outages.

mod config;
mod error;
mod format;
mod routes;
mod state;

use tower_http::services::ServeDir;
use tracing::info;
use transit_api::TransitClient;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, api = %config.api.base_url, "Starting transit dashboard");

    // Build upstream client and application state
    let client = TransitClient::new(config.api.clone())?;
    let state = AppState::new(client);

    // Build router
    let app = routes::router()
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Dashboard listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
