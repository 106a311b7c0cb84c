use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FAILURE_THRESHOLD_MS, DEFAULT_TOTAL_TIMEOUT_MS,
    MAX_FAILURE_THRESHOLD_MS, MAX_TOTAL_TIMEOUT_MS, MIN_TOTAL_TIMEOUT_MS,
};

use std::time::Duration;

use serde::Deserialize;

/// Timing policy for a shutdown run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Total time allowed from startup until finalizers must be done
    pub total_timeout_ms: u64,
    /// Failing finalizers report an error only when they run longer than this
    pub failure_threshold_ms: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            total_timeout_ms: DEFAULT_TOTAL_TIMEOUT_MS,
            failure_threshold_ms: DEFAULT_FAILURE_THRESHOLD_MS,
        }
    }
}

impl ShutdownConfig {
    pub fn total_timeout(&self) -> Duration {
        Duration::from_millis(self.total_timeout_ms)
    }

    pub fn failure_threshold(&self) -> Duration {
        Duration::from_millis(self.failure_threshold_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.total_timeout_ms < MIN_TOTAL_TIMEOUT_MS
            || self.total_timeout_ms > MAX_TOTAL_TIMEOUT_MS
        {
            return Err(ConfigError::shutdown(format!(
                "shutdown.total_timeout_ms must be {}-{}, got {}",
                MIN_TOTAL_TIMEOUT_MS, MAX_TOTAL_TIMEOUT_MS, self.total_timeout_ms
            )));
        }

        if self.failure_threshold_ms > MAX_FAILURE_THRESHOLD_MS {
            return Err(ConfigError::shutdown(format!(
                "shutdown.failure_threshold_ms must be at most {}, got {}",
                MAX_FAILURE_THRESHOLD_MS, self.failure_threshold_ms
            )));
        }

        Ok(())
    }
}
