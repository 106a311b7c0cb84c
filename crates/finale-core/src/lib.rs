pub mod cancellation;
pub mod cancellation_guard;
pub mod completion_signal;
pub mod controller_state;
pub mod deadline;
pub mod deadline_guard;
pub mod error;
pub mod error_signal;
pub mod finalizer_runner;
pub mod finalizer_task;
pub mod interrupt;
pub mod join_barrier;
pub mod metrics;
pub mod outcome;
pub mod result_channels;
pub mod result_collector;
pub mod shutdown_controller;
pub mod shutdown_settings;
pub mod task_error;

pub use cancellation::{Cancellation, SendPermit};
pub use cancellation_guard::CancellationGuard;
pub use completion_signal::CompletionSignal;
pub use controller_state::{ControllerState, TerminalPath};
pub use deadline::Deadline;
pub use deadline_guard::{DeadlineGuard, GuardVerdict};
pub use error::{CoreError, Result};
pub use error_signal::ErrorSignal;
pub use finalizer_runner::FinalizerRunner;
pub use finalizer_task::FinalizerTask;
pub use interrupt::{Interrupt, InterruptTrigger};
pub use join_barrier::{JoinBarrier, JoinTicket};
pub use metrics::Metrics;
pub use outcome::Outcome;
pub use result_channels::{ClosedResults, ResultReceiver, ResultSender, result_channels};
pub use result_collector::ResultCollector;
pub use shutdown_controller::ShutdownController;
pub use shutdown_settings::ShutdownSettings;
pub use task_error::TaskError;

#[cfg(test)]
mod tests;

use std::time::Duration;

use tracing::info_span;

/// Finalizers that may fail report an error once they run longer than this.
pub const DEFAULT_FAILURE_THRESHOLD: Duration = Duration::from_millis(2_000);

/// Create a tracing span for one finalizer executor.
/// All log entries emitted by the executor carry the task name.
pub fn create_executor_span(task_name: &str) -> tracing::Span {
    info_span!("finalizer", task = %task_name)
}
