//! Simulator configuration

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::SimulatorError;

/// Simulator configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Initial logical time, `YYYY-MM-DDTHH:MM:SS`
    pub start: String,
    /// Number of monthly steps to simulate
    pub months: u32,
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            start: "2024-01-01T00:00:00".to_string(),
            months: 12,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl SimulatorConfig {
    /// Loads configuration from `SIM_*` environment variables
    pub fn from_env() -> Result<Self, SimulatorError> {
        Ok(config::Config::builder()
            .add_source(config::Environment::with_prefix("SIM"))
            .build()?
            .try_deserialize()?)
    }

    /// Parses the configured start time
    pub fn start_time(&self) -> Result<NaiveDateTime, SimulatorError> {
        self.start
            .parse()
            .map_err(|_| SimulatorError::InvalidStart(self.start.clone()))
    }
}
