//! Public types and constants for the visualization module.

use crate::models::Indicator;
use serde::{Deserialize, Serialize};

/// Year at which the "Policy Change" marker is drawn.
pub const POLICY_CHANGE_YEAR: i32 = 2022;

/// Annotation text attached to the policy-change marker.
pub const POLICY_CHANGE_TEXT: &str = "Policy Change";

/// Smallest canvas [`render_svg`](super::render_svg) accepts, in pixels.
pub const MIN_CHART_WIDTH: u32 = 200;
pub const MIN_CHART_HEIGHT: u32 = 150;

/// Chart kinds the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Bars per year, one colour per country.
    Bar,
    /// Markers only.
    #[default]
    Scatter,
}

impl ChartKind {
    /// The other kind.
    pub fn flipped(self) -> Self {
        match self {
            ChartKind::Bar => ChartKind::Scatter,
            ChartKind::Scatter => ChartKind::Bar,
        }
    }

    /// Kind implied by a number of toggle clicks: odd is bar, even (including zero) is scatter.
    pub fn from_clicks(clicks: u32) -> Self {
        if clicks % 2 == 1 {
            ChartKind::Bar
        } else {
            ChartKind::Scatter
        }
    }

    pub fn title_suffix(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Scatter => "Scatter Plot",
        }
    }
}

/// One axis of the chart. `range` is `None` when there is nothing to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    pub range: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// Points of one country, coloured as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
    pub points: Vec<SeriesPoint>,
}

/// Vertical line from `(x, y0)` to `(x, y1)` in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
    pub color: String,
    pub width: u32,
}

/// Text pointing at a data coordinate; `ax`/`ay` offset the label in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub show_arrow: bool,
    pub arrow_head: u8,
    pub ax: i32,
    pub ay: i32,
}

/// Everything needed to draw a chart; independent of any backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub indicator: Indicator,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
    pub reference_line: Option<ReferenceLine>,
    pub annotations: Vec<Annotation>,
}

impl ChartSpec {
    /// Total number of plotted points across all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}
