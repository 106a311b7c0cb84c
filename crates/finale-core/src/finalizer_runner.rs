use crate::{
    Cancellation, CancellationGuard, CompletionSignal, Deadline, ErrorSignal, FinalizerTask,
    JoinBarrier, JoinTicket, Metrics, ResultSender, TaskError, create_executor_span,
};

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, sleep_until};
use tracing::Instrument;

/// Launches one executor per finalizer task.
pub struct FinalizerRunner {
    tasks: Arc<[FinalizerTask]>,
    failure_threshold: Duration,
    metrics: Metrics,
}

impl FinalizerRunner {
    pub fn new(tasks: Arc<[FinalizerTask]>, failure_threshold: Duration) -> Self {
        Self {
            tasks,
            failure_threshold,
            metrics: Metrics::new(),
        }
    }

    /// Spawn the executors and return the barrier tracking them. Must be
    /// called from within a tokio runtime.
    pub fn start(
        &self,
        sender: &ResultSender,
        cancellation: &Cancellation,
        deadline: Deadline,
    ) -> JoinBarrier {
        let barrier = JoinBarrier::new();

        // Every ticket exists before any executor can return.
        let tickets: Vec<JoinTicket> = self.tasks.iter().map(|_| barrier.ticket()).collect();

        for (task, ticket) in self.tasks.iter().cloned().zip(tickets) {
            let span = create_executor_span(task.name());
            let executor = Executor {
                task,
                failure_threshold: self.failure_threshold,
                sender: sender.clone(),
                guard: cancellation.subscribe(),
                deadline,
                metrics: self.metrics.clone(),
            };

            self.metrics.executor_started();
            tokio::spawn(
                async move {
                    let _ticket = ticket;
                    executor.run().await;
                }
                .instrument(span),
            );
        }

        log::debug!("Launched {} executor(s)", self.tasks.len());
        barrier
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecutorExit {
    Finished,
    Cancelled,
}

impl ExecutorExit {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }
}

struct Executor {
    task: FinalizerTask,
    failure_threshold: Duration,
    sender: ResultSender,
    guard: CancellationGuard,
    deadline: Deadline,
    metrics: Metrics,
}

impl Executor {
    async fn run(mut self) {
        let exit = self.execute().await;
        log::debug!("Finalizer {} returned ({})", self.task.name(), exit.as_str());
        self.metrics.executor_returned(exit.as_str());
    }

    async fn execute(&mut self) -> ExecutorExit {
        log::info!("Simulating work in {}", self.task.name());

        tokio::select! {
            biased;
            _ = self.guard.wait() => return ExecutorExit::Cancelled,
            _ = sleep_until(self.deadline.instant()) => return ExecutorExit::Cancelled,
            _ = sleep(self.task.simulated_duration()) => {}
        }

        if self.task.fails_past(self.failure_threshold) {
            let signal = ErrorSignal::new(TaskError::finalize_failed(self.task.name()));
            if !self.may_send() || !self.sender.send_error(signal) {
                return ExecutorExit::Cancelled;
            }
        }

        let signal = CompletionSignal::new(self.task.name());
        if !self.may_send() || !self.sender.send_completion(signal) {
            return ExecutorExit::Cancelled;
        }

        ExecutorExit::Finished
    }

    /// The deadline cancels executors even before the controller notices it.
    fn may_send(&self) -> bool {
        !self.guard.poll_cancelled() && !self.deadline.has_passed()
    }
}
