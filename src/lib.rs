//! health_dash
//!
//! A small web dashboard over a fixed table of global-health statistics. Pairs with the
//! `health-dash` binary.
//!
//! ### Features
//! - Filter the five-country sample by country set and inclusive year range
//! - Chart one indicator per country as bars or markers, with an optional "Policy Change" marker
//! - Render charts to SVG with Plotters
//! - Export the full dataset as CSV or JSON
//! - Serve it all over HTTP with a reactive page
//!
//! ### Example
//! ```
//! use health_dash::{Dataset, Indicator, YearRange, filter, viz};
//!
//! let data = Dataset::sample();
//! let countries = ["USA".to_string()].into_iter().collect();
//! let rows = filter::filter_records(data.records(), &countries, YearRange::new(2020, 2024));
//! let spec = viz::build_chart(
//!     &rows,
//!     &data.countries(),
//!     Indicator::LifeExpectancy,
//!     &viz::ChartOptions {
//!         kind: viz::ChartKind::Bar,
//!         title: viz::chart_title(Indicator::LifeExpectancy, None),
//!         policy_marker: true,
//!     },
//! );
//! assert_eq!(spec.point_count(), 1);
//! let svg = viz::render_svg(&spec, 900, 500)?;
//! health_dash::export::save_csv(data.records(), std::env::temp_dir().join("health.csv"))?;
//! # let _ = svg;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod server;
pub mod stats;
pub mod viz;

pub use config::DashboardConfig;
pub use dataset::Dataset;
pub use error::{DashboardError, DashboardResult};
pub use models::{HealthRecord, Indicator, Variant, YearRange};
