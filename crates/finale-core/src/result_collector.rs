use crate::{ClosedResults, Metrics, Outcome};

use std::collections::BTreeSet;

/// Drains closed result channels into an `Outcome`
pub struct ResultCollector {
    metrics: Metrics,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self {
            metrics: Metrics::new(),
        }
    }

    /// Only closed channels are accepted, so draining always terminates.
    pub fn collect(&self, results: ClosedResults, timed_out: bool) -> Outcome {
        let (completions, errors) = results.drain();

        let mut completed = BTreeSet::new();
        for signal in completions {
            log::debug!("{} completed", signal.task_name);
            if !completed.insert(signal.task_name) {
                log::warn!("Duplicate completion signal dropped");
            }
        }

        let errors: Vec<_> = errors
            .into_iter()
            .map(|signal| {
                log::debug!("Collected error: {}", signal.cause);
                signal.cause
            })
            .collect();

        self.metrics.outcome_collected(completed.len(), errors.len());

        Outcome::new(completed, errors, timed_out)
    }
}

impl Default for ResultCollector {
    fn default() -> Self {
        Self::new()
    }
}
