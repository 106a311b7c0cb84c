use std::time::Duration;

/// A named unit of shutdown work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizerTask {
    name: String,
    simulated_duration: Duration,
    may_fail: bool,
}

impl FinalizerTask {
    pub fn new<S: Into<String>>(name: S, simulated_duration: Duration, may_fail: bool) -> Self {
        Self {
            name: name.into(),
            simulated_duration,
            may_fail,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simulated_duration(&self) -> Duration {
        self.simulated_duration
    }

    pub fn may_fail(&self) -> bool {
        self.may_fail
    }

    /// Whether this task reports an error once its work is done
    pub fn fails_past(&self, failure_threshold: Duration) -> bool {
        self.may_fail && self.simulated_duration > failure_threshold
    }
}
