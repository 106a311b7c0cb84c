use crate::{FinalizerTask, TaskError};

use std::collections::BTreeSet;

use serde::{Serialize, Serializer};

/// Aggregate result of a shutdown run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    completed: BTreeSet<String>,
    #[serde(serialize_with = "serialize_errors")]
    errors: Vec<TaskError>,
    timed_out: bool,
}

impl Outcome {
    pub fn new(completed: BTreeSet<String>, errors: Vec<TaskError>, timed_out: bool) -> Self {
        Self {
            completed,
            errors,
            timed_out,
        }
    }

    /// Nothing completed, nothing reported, deadline missed
    pub(crate) fn degenerate() -> Self {
        Self::new(BTreeSet::new(), Vec::new(), true)
    }

    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn is_completed(&self, task_name: &str) -> bool {
        self.completed.contains(task_name)
    }

    /// Errors in the order the collector received them
    pub fn errors(&self) -> &[TaskError] {
        &self.errors
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// No timeout and no errors
    pub fn is_clean(&self) -> bool {
        !self.timed_out && self.errors.is_empty()
    }

    /// Configured tasks that neither completed nor reported an error
    pub fn unaccounted<'a>(&self, tasks: &'a [FinalizerTask]) -> Vec<&'a str> {
        tasks
            .iter()
            .map(FinalizerTask::name)
            .filter(|name| {
                !self.completed.contains(*name) && !self.errors.iter().any(|e| e.task() == *name)
            })
            .collect()
    }
}

fn serialize_errors<S: Serializer>(errors: &[TaskError], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}
