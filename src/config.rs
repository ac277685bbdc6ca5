use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::scan::ScanSchedule;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Base URL of the backend
    pub base_url: String,

    /// Delay between status polls, in milliseconds
    pub poll_interval_ms: u64,

    /// How long the completion message stays visible, in milliseconds
    pub completion_display_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            poll_interval_ms: 1_000,
            completion_display_ms: 3_000,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());

        if !path.exists() {
            info!("Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Scan timing derived from this configuration
    pub fn schedule(&self) -> ScanSchedule {
        ScanSchedule {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            completion_display: Duration::from_millis(self.completion_display_ms),
        }
    }
}
