//! Runtime configuration for the dashboard server.

use crate::error::{DashboardError, DashboardResult};
use crate::models::Variant;
use crate::viz::{MIN_CHART_HEIGHT, MIN_CHART_WIDTH};
use std::time::Duration;

/// Server and rendering settings. The binary fills this from command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Which dashboard behaviour to serve
    pub variant: Variant,
    /// Artificial delay before each render completes
    pub latency: Option<Duration>,
    /// Chart size in pixels
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            variant: Variant::default(),
            latency: None,
            chart_width: 900,
            chart_height: 500,
        }
    }
}

impl DashboardConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject settings the renderer cannot honour, before any request is served.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.chart_width < MIN_CHART_WIDTH || self.chart_height < MIN_CHART_HEIGHT {
            return Err(DashboardError::InvalidConfig(format!(
                "chart size {}x{} is below the {}x{} minimum",
                self.chart_width, self.chart_height, MIN_CHART_WIDTH, MIN_CHART_HEIGHT
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_addr() {
        assert_eq!(DashboardConfig::default().addr(), "127.0.0.1:8050");
        assert_eq!(DashboardConfig::new("0.0.0.0", 9000).addr(), "0.0.0.0:9000");
    }

    #[test]
    fn chart_size_below_minimum_is_rejected() {
        assert!(DashboardConfig::default().validate().is_ok());
        let narrow = DashboardConfig {
            chart_width: 120,
            ..DashboardConfig::default()
        };
        assert!(matches!(narrow.validate(), Err(DashboardError::InvalidConfig(_))));
        let flat = DashboardConfig {
            chart_height: MIN_CHART_HEIGHT - 1,
            ..DashboardConfig::default()
        };
        assert!(flat.validate().is_err());
    }
}
