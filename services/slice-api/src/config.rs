//! Server configuration loading and types.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:18080";

/// Server settings, optionally loaded from a YAML file.
///
/// Command-line flags override values read from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub listen: String,

    /// Register `/get-image`.
    pub enable_image_route: bool,

    /// Tokio worker threads; `None` uses the runtime default.
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN_ADDR.to_string(),
            enable_image_route: true,
            worker_threads: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: ServerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Loaded server config");
        Ok(config)
    }
}
