//! Export Routes
//!
//! - GET /api/export - Download the full dataset (never the filtered view)

use axum::{
    body::Body,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::DashboardError;
use crate::export;
use crate::server::dto::ExportParams;
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;

/// GET /api/export?format=csv|json
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let ctl = state.controller.lock().await;
    let records = ctl.dataset().records();
    let csv_name = ctl.variant().export_filename();

    let (content_type, filename, body) = match params.format.to_lowercase().as_str() {
        "csv" => (
            "text/csv",
            csv_name.to_string(),
            export::to_csv_bytes(records).map_err(|e| DashboardError::Export(e.to_string()))?,
        ),
        "json" => (
            "application/json",
            csv_name.replace(".csv", ".json"),
            export::to_json_bytes(records).map_err(|e| DashboardError::Export(e.to_string()))?,
        ),
        other => {
            return Err(ApiError::Validation(format!(
                "unsupported export format: {other}"
            )));
        }
    };

    log::info!("exporting {} records as {}", records.len(), filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
