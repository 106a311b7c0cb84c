use crate::{CoreError, DEFAULT_FAILURE_THRESHOLD, FinalizerTask, Result};

use std::collections::HashSet;
use std::time::Duration;

/// Everything a shutdown run needs, supplied at construction.
#[derive(Debug, Clone)]
pub struct ShutdownSettings {
    pub tasks: Vec<FinalizerTask>,
    pub total_timeout: Duration,
    pub failure_threshold: Duration,
}

impl ShutdownSettings {
    pub fn new(tasks: Vec<FinalizerTask>, total_timeout: Duration) -> Self {
        Self {
            tasks,
            total_timeout,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
        }
    }

    pub fn with_failure_threshold(mut self, failure_threshold: Duration) -> Self {
        self.failure_threshold = failure_threshold;
        self
    }

    /// Task names must be non-empty and unique, since the outcome reports
    /// completion by name.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.tasks.len());

        for task in &self.tasks {
            if task.name().trim().is_empty() {
                return Err(CoreError::invalid_task_set("task name cannot be empty"));
            }

            if !seen.insert(task.name()) {
                return Err(CoreError::invalid_task_set(format!(
                    "duplicate task name '{}'",
                    task.name()
                )));
            }
        }

        Ok(())
    }
}
