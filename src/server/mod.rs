//! Dashboard HTTP server
//!
//! Built with Axum. One process serves one dashboard; the selection lives in [`AppState`].
//!
//! # Endpoints
//!
//! - `GET /` - Dashboard page
//! - `GET /api/options` - Countries, indicators, year bounds, defaults
//! - `GET /api/state` - Selection, phase, revision
//! - `GET /api/chart` - Chart on display (spec + SVG + summaries)
//! - `POST /api/events` - Apply a widget event
//! - `GET /api/export` - Download the full dataset as CSV (or JSON)
//! - `GET /health` - Health status
//!
//! # Example
//!
//! ```rust,no_run
//! use health_dash::server::{serve, AppState};
//! use health_dash::DashboardConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DashboardConfig::default();
//!     let state = AppState::new(config.clone())?;
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::config::DashboardConfig;

/// Build the router with all routes
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/options", get(routes::dashboard::options))
        .route("/state", get(routes::dashboard::current_state))
        .route("/chart", get(routes::dashboard::current_chart))
        .route("/events", post(routes::dashboard::post_event))
        .route("/export", get(routes::export::export_data));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .route("/health", get(routes::health::health))
        .nest("/api", api_routes)
        .with_state(shared_state)
}

/// Start the server and run until Ctrl+C / SIGTERM
pub async fn serve(state: AppState, config: &DashboardConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("Dashboard ({:?}) listening on http://{}", config.variant, addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    log::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutdown signal received, starting graceful shutdown");
}
