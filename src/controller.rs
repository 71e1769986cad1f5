//! Selection state, widget events, and the render state machine.
//!
//! Every widget change is an [`Event`]. [`reduce`] folds it into a new [`Selection`] without
//! touching anything else, and [`render`] maps `(dataset, selection, variant)` to a chart. The
//! [`Controller`] owns the one live selection and walks `Idle -> Loading -> Rendered`:
//!
//! ```
//! use health_dash::controller::{Controller, Event, Phase, RenderOutcome};
//! use health_dash::{Dataset, Variant};
//! use std::sync::Arc;
//!
//! let mut ctl = Controller::new(Arc::new(Dataset::sample()), Variant::Annotated)?;
//! let ticket = ctl.begin(&Event::SelectCountries { countries: vec!["USA".into()] })?;
//! assert_eq!(ctl.phase(), Phase::Loading);
//! let outcome = ctl.finish(ticket);
//! assert!(matches!(outcome, RenderOutcome::Rendered { .. }));
//! assert_eq!(ctl.phase(), Phase::Rendered);
//! # Ok::<(), health_dash::DashboardError>(())
//! ```
//!
//! Latency is not simulated here. The caller may wait between [`Controller::begin`] and
//! [`Controller::finish`]; if another event begins meanwhile, the older finish reports
//! [`RenderOutcome::Superseded`] and leaves the chart alone.

use crate::dataset::Dataset;
use crate::error::{DashboardError, DashboardResult};
use crate::filter::FilterQuery;
use crate::models::{Indicator, Variant, YearRange};
use crate::viz::{self, ChartKind, ChartOptions, ChartSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Countries preselected when the dashboard opens.
pub const DEFAULT_COUNTRIES: [&str; 3] = ["Rwanda", "Burundi", "USA"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Rendered,
}

/// Current widget values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub countries: BTreeSet<String>,
    pub indicator: Option<Indicator>,
    pub year_range: YearRange,
    /// Toggle button presses so far.
    pub clicks: u32,
    pub chart_kind: ChartKind,
}

impl Selection {
    /// Opening selection: [`DEFAULT_COUNTRIES`], life expectancy, the full year range, scatter.
    pub fn initial(dataset: &Dataset) -> DashboardResult<Self> {
        let bounds = dataset.year_bounds().ok_or(DashboardError::EmptyDataset)?;
        Ok(Self {
            countries: DEFAULT_COUNTRIES
                .iter()
                .filter(|c| dataset.has_country(c))
                .map(|c| c.to_string())
                .collect(),
            indicator: Some(Indicator::LifeExpectancy),
            year_range: bounds,
            clicks: 0,
            chart_kind: ChartKind::from_clicks(0),
        })
    }

    pub fn query(&self) -> FilterQuery {
        FilterQuery::new(self.countries.clone(), self.year_range)
    }
}

/// A widget change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SelectCountries { countries: Vec<String> },
    SelectIndicator { indicator: Option<Indicator> },
    SetYearRange { start: i32, end: i32 },
    ToggleChartKind,
}

impl Event {
    fn validate(&self, dataset: &Dataset) -> DashboardResult<()> {
        if let Event::SelectCountries { countries } = self
            && let Some(unknown) = countries.iter().find(|c| !dataset.has_country(c))
        {
            return Err(DashboardError::UnknownCountry(unknown.clone()));
        }
        Ok(())
    }
}

/// Fold one event into a selection. Year ranges are ordered and clamped into `bounds`.
pub fn reduce(selection: &Selection, event: &Event, bounds: YearRange) -> Selection {
    let mut next = selection.clone();
    match event {
        Event::SelectCountries { countries } => {
            next.countries = countries.iter().cloned().collect();
        }
        Event::SelectIndicator { indicator } => {
            next.indicator = *indicator;
        }
        Event::SetYearRange { start, end } => {
            next.year_range = YearRange::new(*start, *end).clamp_to(bounds);
        }
        Event::ToggleChartKind => {
            next.clicks = next.clicks.saturating_add(1);
            next.chart_kind = next.chart_kind.flipped();
        }
    }
    next
}

/// Build the chart for a selection, or `None` when the previous chart should stay up.
///
/// - `Annotated`: bar chart with the policy-change overlay. An empty country selection still
///   yields an (empty) chart; only a missing indicator skips the render.
/// - `Toggle`: bar or scatter per [`Selection::chart_kind`], no overlay. Skips when no country
///   or no indicator is selected.
pub fn render(dataset: &Dataset, selection: &Selection, variant: Variant) -> Option<ChartSpec> {
    let indicator = selection.indicator?;
    let options = match variant {
        Variant::Annotated => ChartOptions {
            kind: ChartKind::Bar,
            title: viz::chart_title(indicator, None),
            policy_marker: true,
        },
        Variant::Toggle => {
            if selection.countries.is_empty() {
                return None;
            }
            ChartOptions {
                kind: selection.chart_kind,
                title: viz::chart_title(indicator, Some(selection.chart_kind)),
                policy_marker: false,
            }
        }
    };
    let filtered = selection.query().apply(dataset.records());
    Some(viz::build_chart(&filtered, &dataset.countries(), indicator, &options))
}

/// Handle for one in-flight render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub revision: u64,
}

/// Result of finishing a render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// A new chart replaced the displayed one.
    Rendered { chart: ChartSpec },
    /// Nothing to draw for this selection; the displayed chart (if any) stays.
    Unchanged,
    /// A newer event began before this render finished.
    Superseded,
}

impl RenderOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            RenderOutcome::Rendered { .. } => "rendered",
            RenderOutcome::Unchanged => "unchanged",
            RenderOutcome::Superseded => "superseded",
        }
    }
}

/// Owner of the live selection and the displayed chart.
#[derive(Debug, Clone)]
pub struct Controller {
    dataset: Arc<Dataset>,
    variant: Variant,
    bounds: YearRange,
    selection: Selection,
    phase: Phase,
    revision: u64,
    chart: Option<ChartSpec>,
    /// Selection `chart` was rendered from.
    chart_selection: Option<Selection>,
    latency: Option<Duration>,
}

impl Controller {
    pub fn new(dataset: Arc<Dataset>, variant: Variant) -> DashboardResult<Self> {
        let bounds = dataset.year_bounds().ok_or(DashboardError::EmptyDataset)?;
        let selection = Selection::initial(&dataset)?;
        Ok(Self {
            dataset,
            variant,
            bounds,
            selection,
            phase: Phase::Idle,
            revision: 0,
            chart: None,
            chart_selection: None,
            latency: None,
        })
    }

    /// Artificial delay the caller should wait between `begin` and `finish`.
    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Option<Duration> {
        self.latency
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn bounds(&self) -> YearRange {
        self.bounds
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The chart currently on display.
    pub fn chart(&self) -> Option<&ChartSpec> {
        self.chart.as_ref()
    }

    /// The selection behind [`Controller::chart`]. Differs from [`Controller::selection`] after
    /// an event that left the chart unchanged or is still loading.
    pub fn chart_selection(&self) -> Option<&Selection> {
        self.chart_selection.as_ref()
    }

    /// Apply `event` and enter `Loading`. Rejected events leave everything unchanged.
    pub fn begin(&mut self, event: &Event) -> DashboardResult<Ticket> {
        event.validate(&self.dataset)?;
        self.selection = reduce(&self.selection, event, self.bounds);
        Ok(self.bump())
    }

    /// Enter `Loading` for the current selection without changing it (first page load).
    pub fn refresh(&mut self) -> Ticket {
        self.bump()
    }

    fn bump(&mut self) -> Ticket {
        self.revision += 1;
        self.phase = Phase::Loading;
        Ticket {
            revision: self.revision,
        }
    }

    /// Render for `ticket` unless a newer event has begun since.
    pub fn finish(&mut self, ticket: Ticket) -> RenderOutcome {
        if ticket.revision != self.revision {
            return RenderOutcome::Superseded;
        }
        match render(&self.dataset, &self.selection, self.variant) {
            Some(chart) => {
                self.chart = Some(chart.clone());
                self.chart_selection = Some(self.selection.clone());
                self.phase = Phase::Rendered;
                RenderOutcome::Rendered { chart }
            }
            None => {
                self.phase = if self.chart.is_some() {
                    Phase::Rendered
                } else {
                    Phase::Idle
                };
                RenderOutcome::Unchanged
            }
        }
    }

    /// `begin` + `finish` with no wait in between.
    pub fn dispatch(&mut self, event: &Event) -> DashboardResult<RenderOutcome> {
        let ticket = self.begin(event)?;
        Ok(self.finish(ticket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(variant: Variant) -> Controller {
        Controller::new(Arc::new(Dataset::sample()), variant).unwrap()
    }

    #[test]
    fn initial_selection_matches_dashboard_defaults() {
        let ctl = controller(Variant::Annotated);
        let sel = ctl.selection();
        assert_eq!(sel.countries.len(), 3);
        assert!(sel.countries.contains("Burundi"));
        assert_eq!(sel.indicator, Some(Indicator::LifeExpectancy));
        assert_eq!(sel.year_range, YearRange::new(2020, 2024));
        assert_eq!(sel.chart_kind, ChartKind::Scatter);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.chart().is_none());
    }

    #[test]
    fn year_range_is_clamped() {
        let sel = Selection::initial(&Dataset::sample()).unwrap();
        let next = reduce(
            &sel,
            &Event::SetYearRange { start: 2030, end: 1990 },
            YearRange::new(2020, 2024),
        );
        assert_eq!(next.year_range, YearRange::new(2020, 2024));
        // the input is untouched
        assert_eq!(sel.clicks, 0);
    }

    #[test]
    fn unknown_country_is_rejected() {
        let mut ctl = controller(Variant::Annotated);
        let before = ctl.selection().clone();
        let err = ctl
            .begin(&Event::SelectCountries { countries: vec!["Atlantis".into()] })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ctl.selection(), &before);
        assert_eq!(ctl.revision(), 0);
    }

    #[test]
    fn stale_finish_is_superseded() {
        let mut ctl = controller(Variant::Annotated);
        let first = ctl.begin(&Event::SelectIndicator { indicator: Some(Indicator::Diabetes) }).unwrap();
        let second = ctl.begin(&Event::SetYearRange { start: 2020, end: 2022 }).unwrap();
        assert_eq!(ctl.finish(first), RenderOutcome::Superseded);
        assert_eq!(ctl.phase(), Phase::Loading);
        assert!(matches!(ctl.finish(second), RenderOutcome::Rendered { .. }));
        assert_eq!(ctl.phase(), Phase::Rendered);
    }

    #[test]
    fn toggle_variant_keeps_previous_chart_on_empty_selection() {
        let mut ctl = controller(Variant::Toggle);
        let t = ctl.refresh();
        let first = match ctl.finish(t) {
            RenderOutcome::Rendered { chart } => chart,
            other => panic!("expected a chart, got {other:?}"),
        };
        let outcome = ctl
            .dispatch(&Event::SelectCountries { countries: vec![] })
            .unwrap();
        assert_eq!(outcome, RenderOutcome::Unchanged);
        assert_eq!(ctl.chart(), Some(&first));
        assert_eq!(ctl.phase(), Phase::Rendered);
        // the chart still belongs to the opening selection
        assert_eq!(ctl.chart_selection().unwrap().countries.len(), 3);
        assert!(ctl.selection().countries.is_empty());
    }

    #[test]
    fn latency_is_injectable() {
        let ctl = controller(Variant::Toggle).with_latency(Some(Duration::from_millis(5)));
        assert_eq!(ctl.latency(), Some(Duration::from_millis(5)));
    }
}
