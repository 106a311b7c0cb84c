use crate::error::Result;

use std::fmt::Write;
use std::process::ExitCode;

use finale_core::{FinalizerTask, Outcome};

/// Renders an outcome for the console.
pub struct Reporter {
    json: bool,
}

impl Reporter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn render(&self, outcome: &Outcome, tasks: &[FinalizerTask]) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(outcome)?);
        }

        let mut out = String::new();
        if outcome.timed_out() {
            writeln!(out, "oh no, we timed out :(")?;
        } else {
            writeln!(out, "we're done!")?;
        }

        writeln!(out, "completed finalizers:")?;
        for name in outcome.completed() {
            writeln!(out, "    {} completed", name)?;
        }

        writeln!(out, "errors encountered:")?;
        for error in outcome.errors() {
            writeln!(out, "    {}", error)?;
        }

        let unaccounted = outcome.unaccounted(tasks);
        if !unaccounted.is_empty() {
            writeln!(out, "did not finish:")?;
            for name in unaccounted {
                writeln!(out, "    {}", name)?;
            }
        }

        Ok(out)
    }

    pub fn report(&self, outcome: &Outcome, tasks: &[FinalizerTask]) -> Result<()> {
        print!("{}", self.render(outcome, tasks)?);
        Ok(())
    }
}

/// Success only for a clean run: no timeout, no finalizer errors.
pub fn exit_code(outcome: &Outcome) -> ExitCode {
    if outcome.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
