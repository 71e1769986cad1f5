//! Application State
//!
//! Shared state accessible by all handlers.

use crate::config::DashboardConfig;
use crate::controller::Controller;
use crate::dataset::Dataset;
use crate::error::DashboardResult;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The single selection/chart owner. Never locked across the render latency wait.
    pub controller: Arc<Mutex<Controller>>,
    /// Server configuration
    pub config: Arc<DashboardConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build state over the sample dataset and render the opening chart.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        Self::with_dataset(Dataset::sample(), config)
    }

    pub fn with_dataset(dataset: Dataset, config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        let mut controller =
            Controller::new(Arc::new(dataset), config.variant)?.with_latency(config.latency);
        let ticket = controller.refresh();
        let outcome = controller.finish(ticket);
        log::debug!("initial render: {}", outcome.status());

        Ok(Self {
            controller: Arc::new(Mutex::new(controller)),
            config: Arc::new(config),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
