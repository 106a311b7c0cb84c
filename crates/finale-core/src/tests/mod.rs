mod join_barrier;

use crate::{FinalizerTask, ShutdownSettings};

use std::time::Duration;

pub(crate) fn task(name: &str, duration_ms: u64, may_fail: bool) -> FinalizerTask {
    FinalizerTask::new(name, Duration::from_millis(duration_ms), may_fail)
}

pub(crate) fn settings(tasks: Vec<FinalizerTask>, timeout_ms: u64) -> ShutdownSettings {
    ShutdownSettings::new(tasks, Duration::from_millis(timeout_ms))
}
