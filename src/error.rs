//! Error type shared by the controller and the HTTP layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// An event named a country that is not in the dataset.
    #[error("unknown country: {0}")]
    UnknownCountry(String),

    /// The dataset has no rows, so there is no year range to select from.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Drawing the chart failed.
    #[error("render error: {0}")]
    Render(String),

    /// Serializing the export failed.
    #[error("export error: {0}")]
    Export(String),

    /// Server settings that cannot be served, e.g. a chart too small to draw.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DashboardError {
    /// Whether the caller sent bad input (as opposed to a server-side failure).
    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::UnknownCountry(_))
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
