use crate::{ConfigError, ConfigErrorResult, MAX_FINALIZER_DURATION_MS};

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

/// One `[[finalizers]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FinalizerConfig {
    pub name: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub may_fail: bool,
}

impl FinalizerConfig {
    pub fn new<S: Into<String>>(name: S, duration_ms: u64, may_fail: bool) -> Self {
        Self {
            name: name.into(),
            duration_ms,
            may_fail,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Finalizers used when the config file does not list any.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("fast", 1, false),
            Self::new("slow", 1_000, false),
            Self::new("erroring", 5_000, true),
            Self::new("never", 100_000, true),
        ]
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::finalizer("finalizer name cannot be empty"));
        }

        if self.duration_ms > MAX_FINALIZER_DURATION_MS {
            return Err(ConfigError::finalizer(format!(
                "finalizer '{}' duration_ms must be at most {}, got {}",
                self.name, MAX_FINALIZER_DURATION_MS, self.duration_ms
            )));
        }

        Ok(())
    }

    /// Validate every entry and reject duplicate names.
    pub fn validate_all(finalizers: &[Self]) -> ConfigErrorResult<()> {
        let mut seen = HashSet::with_capacity(finalizers.len());

        for finalizer in finalizers {
            finalizer.validate()?;

            if !seen.insert(finalizer.name.as_str()) {
                return Err(ConfigError::finalizer(format!(
                    "duplicate finalizer name '{}'",
                    finalizer.name
                )));
            }
        }

        Ok(())
    }
}
