//! Dashboard Routes
//!
//! - GET /            - The dashboard page
//! - GET /api/options - Widget options and defaults
//! - GET /api/state   - Current selection and render phase
//! - GET /api/chart   - Chart on display
//! - POST /api/events - Apply a widget event and re-render

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Html,
};
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::controller::{Controller, Event, Selection};
use crate::error::DashboardError;
use crate::models::Indicator;
use crate::server::dto::{
    ChartResponse, EventResponse, IndicatorOption, OptionsResponse, StateResponse,
};
use crate::server::error::ApiResult;
use crate::server::state::AppState;
use crate::stats;
use crate::viz;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/options
pub async fn options(State(state): State<Arc<AppState>>) -> ApiResult<Json<OptionsResponse>> {
    let ctl = state.controller.lock().await;
    let dataset = ctl.dataset();
    let bounds = ctl.bounds();

    Ok(Json(OptionsResponse {
        countries: dataset.countries().into_iter().map(String::from).collect(),
        indicators: Indicator::ALL.into_iter().map(IndicatorOption::from).collect(),
        year_min: bounds.start,
        year_max: bounds.end,
        variant: ctl.variant(),
        export_filename: ctl.variant().export_filename().to_string(),
        defaults: Selection::initial(dataset)?,
        selection: ctl.selection().clone(),
    }))
}

/// GET /api/state
pub async fn current_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let ctl = state.controller.lock().await;
    Json(StateResponse {
        selection: ctl.selection().clone(),
        phase: ctl.phase(),
        revision: ctl.revision(),
        variant: ctl.variant(),
    })
}

/// GET /api/chart
pub async fn current_chart(State(state): State<Arc<AppState>>) -> ApiResult<Json<ChartResponse>> {
    let ctl = state.controller.lock().await;
    Ok(Json(chart_view(&ctl, &state.config)?))
}

/// POST /api/events
///
/// The controller lock is released while the configured latency elapses, so a newer event can
/// begin in the meantime and this one then finishes as superseded.
pub async fn post_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Event>, JsonRejection>,
) -> ApiResult<Json<EventResponse>> {
    let Json(event) = payload?;
    let (ticket, latency) = {
        let mut ctl = state.controller.lock().await;
        (ctl.begin(&event)?, ctl.latency())
    };
    log::debug!("event {:?} -> revision {}", event, ticket.revision);

    if let Some(delay) = latency {
        tokio::time::sleep(delay).await;
    }

    let mut ctl = state.controller.lock().await;
    let outcome = ctl.finish(ticket);
    log::info!("revision {}: {}", ticket.revision, outcome.status());

    Ok(Json(EventResponse {
        status: outcome.status().to_string(),
        view: chart_view(&ctl, &state.config)?,
    }))
}

/// Snapshot of the displayed chart, rasterised to SVG, with summaries of the selection it was
/// rendered from.
fn chart_view(ctl: &Controller, config: &DashboardConfig) -> Result<ChartResponse, DashboardError> {
    let svg = match ctl.chart() {
        Some(chart) => Some(
            viz::render_svg(chart, config.chart_width, config.chart_height)
                .map_err(|e| DashboardError::Render(e.to_string()))?,
        ),
        None => None,
    };

    let summaries = match ctl.chart_selection().and_then(|s| s.indicator.map(|i| (s, i))) {
        Some((selection, indicator)) => {
            let filtered = selection.query().apply(ctl.dataset().records());
            let mut out = stats::grouped_summary(&filtered, indicator);
            if !filtered.is_empty() {
                out.push(stats::overall_summary(&filtered, indicator));
            }
            out
        }
        None => Vec::new(),
    };

    Ok(ChartResponse {
        revision: ctl.revision(),
        phase: ctl.phase(),
        chart: ctl.chart().cloned(),
        svg,
        summaries,
    })
}
