//! Application state for the slice API.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use netcdf_parser::GriddedDataset;

use crate::config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// The dataset opened at startup, shared read-only by all requests.
    pub dataset: Arc<dyn GriddedDataset>,

    /// Effective server configuration.
    pub config: ServerConfig,

    /// Prometheus exporter handle, when a recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(dataset: Arc<dyn GriddedDataset>, config: ServerConfig) -> Self {
        Self {
            dataset,
            config,
            prometheus: None,
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
