use crate::observability::logging::LogLevel;
use serde::Deserialize;
use thiserror::Error;

const MIN_STAY_OF_EXECUTION_HOURS: u64 = 1;
const MAX_STAY_OF_EXECUTION_HOURS: u64 = 24 * 365;

fn default_stay_of_execution_hours() -> u64 {
    24
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

/// Run configuration for the domination batch job, loaded from a JSON
/// object. Unknown knobs are rejected at parse time.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DominationConfig {
    /// Retention delay stamped onto dominated publications; the external
    /// sweep removes files only after this many hours have passed.
    #[serde(default = "default_stay_of_execution_hours")]
    pub stay_of_execution_hours: u64,
    /// Plan and log every decision, but write no transitions.
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Default for DominationConfig {
    fn default() -> Self {
        Self {
            stay_of_execution_hours: default_stay_of_execution_hours(),
            dry_run: false,
            log_level: default_log_level(),
        }
    }
}

impl DominationConfig {
    /// Parses and validates a JSON configuration blob.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates knob ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stay_of_execution_hours < MIN_STAY_OF_EXECUTION_HOURS
            || self.stay_of_execution_hours > MAX_STAY_OF_EXECUTION_HOURS
        {
            return Err(ConfigError::StayOfExecutionOutOfRange {
                value: self.stay_of_execution_hours,
                min: MIN_STAY_OF_EXECUTION_HOURS,
                max: MAX_STAY_OF_EXECUTION_HOURS,
            });
        }
        Ok(())
    }

    /// The stay of execution in milliseconds.
    pub fn stay_of_execution_ms(&self) -> u64 {
        self.stay_of_execution_hours * 3_600_000
    }
}

/// Rejections raised while loading a configuration blob.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("stay_of_execution_hours must be within {min}..={max}, got {value}")]
    StayOfExecutionOutOfRange { value: u64, min: u64, max: u64 },
}
