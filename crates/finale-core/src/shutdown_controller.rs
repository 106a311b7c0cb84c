use crate::{
    Cancellation, ControllerState, CoreError, Deadline, DeadlineGuard, FinalizerRunner,
    FinalizerTask, Interrupt, Metrics, Outcome, Result, ResultCollector, ResultReceiver,
    ResultSender, ShutdownSettings, TerminalPath, result_channels,
};

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

/// Top-level driver of a graceful shutdown.
///
/// Construction computes the deadline and creates the result channels.
/// `start` listens for the interrupt in the background; once it arrives the
/// finalizers run until they all return or the deadline fires. The driver
/// then closes the result channels (it is their only owner), collects the
/// outcome and publishes it. `await_completion` only observes the published
/// outcome, so dropping a pending call loses nothing.
pub struct ShutdownController {
    tasks: Arc<[FinalizerTask]>,
    failure_threshold: Duration,
    deadline: Deadline,
    state_tx: Arc<watch::Sender<ControllerState>>,
    outcome_tx: Arc<watch::Sender<Option<Outcome>>>,
    channels: Mutex<Option<Channels>>,
}

struct Channels {
    cancellation: Cancellation,
    sender: ResultSender,
    receiver: ResultReceiver,
}

impl ShutdownController {
    pub fn new(settings: ShutdownSettings) -> Result<Self> {
        settings.validate()?;

        let deadline = Deadline::after(settings.total_timeout);
        let cancellation = Cancellation::new();
        let (sender, receiver) = result_channels(settings.tasks.len(), cancellation.clone());
        let (state_tx, _) = watch::channel(ControllerState::Idle);
        let (outcome_tx, _) = watch::channel(None);

        log::info!(
            "Shutdown controller ready: {} finalizer(s), timeout {:?}",
            settings.tasks.len(),
            settings.total_timeout
        );

        Ok(Self {
            tasks: settings.tasks.into(),
            failure_threshold: settings.failure_threshold,
            deadline,
            state_tx: Arc::new(state_tx),
            outcome_tx: Arc::new(outcome_tx),
            channels: Mutex::new(Some(Channels {
                cancellation,
                sender,
                receiver,
            })),
        })
    }

    /// Begin listening for the interrupt. Non-blocking; must be called
    /// from within a tokio runtime.
    pub fn start(&self, interrupt: Interrupt) -> Result<()> {
        let channels = self
            .channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(CoreError::already_started)?;

        let driver = Driver {
            tasks: Arc::clone(&self.tasks),
            failure_threshold: self.failure_threshold,
            deadline: self.deadline,
            state_tx: Arc::clone(&self.state_tx),
            channels,
            metrics: Metrics::new(),
        };
        let outcome_tx = Arc::clone(&self.outcome_tx);

        transition(&self.state_tx, ControllerState::AwaitingSignal);
        tokio::spawn(async move {
            let outcome = match AssertUnwindSafe(driver.run(interrupt)).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(_) => {
                    log::error!("Shutdown driver panicked, reporting a timed-out outcome");
                    Outcome::degenerate()
                }
            };
            publish(&outcome_tx, outcome);
        });

        Ok(())
    }

    /// Wait for the run to finish and return its outcome. Later calls
    /// return the same outcome without running anything again.
    ///
    /// Cancel-safe. If `start` was never called by the time the deadline
    /// passes, the degenerate timed-out outcome is published and returned.
    pub async fn await_completion(&self) -> Outcome {
        let mut outcome_rx = self.outcome_tx.subscribe();

        let published = tokio::select! {
            biased;
            outcome = wait_published(&mut outcome_rx) => outcome,
            _ = self.unstarted_at_deadline() => {
                log::warn!("Deadline reached before the controller was started");
                None
            }
        };
        if let Some(outcome) = published {
            return outcome;
        }

        publish(&self.outcome_tx, Outcome::degenerate());
        self.outcome_tx
            .borrow()
            .clone()
            .unwrap_or_else(Outcome::degenerate)
    }

    /// Resolves at the deadline if the controller is still idle then;
    /// otherwise never.
    async fn unstarted_at_deadline(&self) {
        sleep_until(self.deadline.instant()).await;
        if self.state() != ControllerState::Idle {
            futures::future::pending::<()>().await;
        }
    }

    pub fn state(&self) -> ControllerState {
        *self.state_tx.borrow()
    }

    /// Watch state transitions as they happen
    pub fn subscribe_state(&self) -> watch::Receiver<ControllerState> {
        self.state_tx.subscribe()
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn tasks(&self) -> &[FinalizerTask] {
        &self.tasks
    }
}

struct Driver {
    tasks: Arc<[FinalizerTask]>,
    failure_threshold: Duration,
    deadline: Deadline,
    state_tx: Arc<watch::Sender<ControllerState>>,
    channels: Channels,
    metrics: Metrics,
}

impl Driver {
    async fn run(self, interrupt: Interrupt) -> Outcome {
        let Channels {
            cancellation,
            sender,
            receiver,
        } = self.channels;

        let interrupted = tokio::select! {
            biased;
            _ = interrupt.wait() => true,
            _ = sleep_until(self.deadline.instant()) => false,
        };
        let started = Instant::now();

        let path = if interrupted {
            log::info!(
                "Interrupt received, running {} finalizer(s)",
                self.tasks.len()
            );
            transition(&self.state_tx, ControllerState::Finalizing);

            let runner = FinalizerRunner::new(Arc::clone(&self.tasks), self.failure_threshold);
            let barrier = runner.start(&sender, &cancellation, self.deadline);

            DeadlineGuard::new(self.deadline)
                .race(&barrier)
                .await
                .terminal_path()
        } else {
            log::warn!("Deadline reached before the interrupt arrived");
            TerminalPath::TimedOut
        };

        if path == TerminalPath::TimedOut {
            log::warn!("Finalizers timed out, collecting partial results");
        }

        transition(&self.state_tx, ControllerState::Draining(path));
        drop(sender);
        let closed = receiver.close().await;
        let outcome = ResultCollector::new().collect(closed, path == TerminalPath::TimedOut);

        transition(&self.state_tx, ControllerState::Done(path));
        self.metrics.run_finished(path, started.elapsed());

        outcome
    }
}

fn transition(state_tx: &watch::Sender<ControllerState>, next: ControllerState) {
    state_tx.send_if_modified(|state| {
        if state.can_transition_to(next) {
            log::info!("Shutdown controller: {:?} -> {:?}", state, next);
            *state = next;
            true
        } else {
            log::error!("Rejected controller transition {:?} -> {:?}", state, next);
            false
        }
    });
}

async fn wait_published(outcome_rx: &mut watch::Receiver<Option<Outcome>>) -> Option<Outcome> {
    outcome_rx.wait_for(Option::is_some).await.ok()?.clone()
}

/// First published outcome wins; later ones are dropped.
fn publish(outcome_tx: &watch::Sender<Option<Outcome>>, outcome: Outcome) {
    outcome_tx.send_if_modified(|slot| {
        if slot.is_some() {
            return false;
        }
        *slot = Some(outcome);
        true
    });
}
