use crate::TerminalPath;

use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Metrics collector for shutdown runs
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "finale" }
    }

    /// Record an executor launched for a finalizer
    pub fn executor_started(&self) {
        counter!(format!("{}.executors.started", self.prefix)).increment(1);
        gauge!(format!("{}.executors.active", self.prefix)).increment(1.0);
    }

    /// Record an executor returning, whatever it sent
    pub fn executor_returned(&self, exit: &str) {
        counter!(format!("{}.executors.returned.{}", self.prefix, exit)).increment(1);
        gauge!(format!("{}.executors.active", self.prefix)).decrement(1.0);
    }

    /// Record a signal written to a result channel
    pub fn signal_sent(&self, channel: &str) {
        counter!(format!("{}.signals.sent.{}", self.prefix, channel)).increment(1);
    }

    /// Record a send refused because cancellation came first
    pub fn send_rejected(&self, channel: &str) {
        counter!(format!("{}.signals.rejected.{}", self.prefix, channel)).increment(1);
    }

    /// Record a broken channel invariant
    pub fn protocol_violation(&self, channel: &str) {
        counter!(format!("{}.protocol_violations.{}", self.prefix, channel)).increment(1);
    }

    /// Record a finished run and how long it took from interrupt to outcome
    pub fn run_finished(&self, path: TerminalPath, duration: Duration) {
        counter!(format!("{}.runs.{}", self.prefix, path.as_str())).increment(1);
        histogram!(format!("{}.runs.duration_ms", self.prefix)).record(duration.as_millis() as f64);
    }

    /// Record the size of a collected outcome
    pub fn outcome_collected(&self, completed: usize, errors: usize) {
        gauge!(format!("{}.outcome.completed", self.prefix)).set(completed as f64);
        gauge!(format!("{}.outcome.errors", self.prefix)).set(errors as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
