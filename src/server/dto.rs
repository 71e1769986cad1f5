//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::controller::{Phase, Selection};
use crate::models::{Indicator, Variant};
use crate::stats::Summary;
use crate::viz::ChartSpec;

// ============================================
// OPTIONS DTOs
// ============================================

/// One entry of the indicator dropdown
#[derive(Debug, Serialize, Deserialize)]
pub struct IndicatorOption {
    pub key: String,
    pub label: String,
    pub column: String,
}

impl From<Indicator> for IndicatorOption {
    fn from(ind: Indicator) -> Self {
        Self {
            key: ind.key().to_string(),
            label: ind.label().to_string(),
            column: ind.column().to_string(),
        }
    }
}

/// Everything the page needs to build its widgets
#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub countries: Vec<String>,
    pub indicators: Vec<IndicatorOption>,
    pub year_min: i32,
    pub year_max: i32,
    pub variant: Variant,
    pub export_filename: String,
    /// Selection the dashboard opened with
    pub defaults: Selection,
    /// Live selection; widgets are filled from this so they agree with the chart
    pub selection: Selection,
}

// ============================================
// STATE / CHART DTOs
// ============================================

/// Current controller state
#[derive(Debug, Serialize, Deserialize)]
pub struct StateResponse {
    pub selection: Selection,
    pub phase: Phase,
    pub revision: u64,
    pub variant: Variant,
}

/// The chart on display plus its rendering
#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub revision: u64,
    pub phase: Phase,
    /// `None` before the first render
    pub chart: Option<ChartSpec>,
    pub svg: Option<String>,
    /// Statistics of the selected indicator over the filtered records, per country then overall
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summaries: Vec<Summary>,
}

/// Response to a dispatched event
#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    /// "rendered", "unchanged" or "superseded"
    pub status: String,
    #[serde(flatten)]
    pub view: ChartResponse,
}

// ============================================
// EXPORT / HEALTH DTOs
// ============================================

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// "csv" (default) or "json"
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub variant: Variant,
    pub uptime_seconds: u64,
}
