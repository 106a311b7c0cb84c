mod settings;

use std::collections::BTreeSet;
use std::time::Duration;

use finale_core::{FinalizerTask, Outcome, TaskError};

pub(crate) fn tasks() -> Vec<FinalizerTask> {
    vec![
        FinalizerTask::new("fast", Duration::from_millis(1), false),
        FinalizerTask::new("slow", Duration::from_millis(1_000), false),
        FinalizerTask::new("erroring", Duration::from_millis(5_000), true),
        FinalizerTask::new("never", Duration::from_millis(100_000), false),
    ]
}

pub(crate) fn outcome(completed: &[&str], errors: &[&str], timed_out: bool) -> Outcome {
    let completed: BTreeSet<String> = completed.iter().map(|s| s.to_string()).collect();
    let errors = errors.iter().map(|s| TaskError::finalize_failed(*s)).collect();
    Outcome::new(completed, errors, timed_out)
}
