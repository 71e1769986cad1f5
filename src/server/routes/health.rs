//! Health Routes
//!
//! - GET /health - Liveness and version

use axum::{Json, extract::State};
use std::sync::Arc;

use crate::server::dto::HealthResponse;
use crate::server::state::AppState;

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        variant: state.config.variant,
        uptime_seconds: state.uptime_seconds(),
    })
}
