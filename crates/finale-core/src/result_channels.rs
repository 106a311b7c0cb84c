use crate::{Cancellation, CompletionSignal, CoreError, ErrorSignal, Metrics};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

pub const COMPLETIONS_CHANNEL: &str = "completions";
pub const ERRORS_CHANNEL: &str = "errors";

/// Create the completion and error channels, each able to hold `capacity`
/// signals so no executor ever waits on the collector.
pub fn result_channels(
    capacity: usize,
    cancellation: Cancellation,
) -> (ResultSender, ResultReceiver) {
    // tokio rejects zero-capacity channels
    let capacity = capacity.max(1);

    let (completions_tx, completions_rx) = mpsc::channel(capacity);
    let (errors_tx, errors_rx) = mpsc::channel(capacity);

    let sender = ResultSender {
        completions: completions_tx,
        errors: errors_tx,
        cancellation: cancellation.clone(),
        metrics: Metrics::new(),
    };
    let receiver = ResultReceiver {
        completions: completions_rx,
        errors: errors_rx,
        cancellation,
    };

    (sender, receiver)
}

/// Writing half, cloned into every executor. Never closes anything.
#[derive(Clone)]
pub struct ResultSender {
    completions: mpsc::Sender<CompletionSignal>,
    errors: mpsc::Sender<ErrorSignal>,
    cancellation: Cancellation,
    metrics: Metrics,
}

impl ResultSender {
    /// Returns false when the send was skipped because of cancellation.
    pub fn send_completion(&self, signal: CompletionSignal) -> bool {
        self.send(&self.completions, COMPLETIONS_CHANNEL, signal)
    }

    /// Returns false when the send was skipped because of cancellation.
    pub fn send_error(&self, signal: ErrorSignal) -> bool {
        self.send(&self.errors, ERRORS_CHANNEL, signal)
    }

    fn send<T>(&self, tx: &mpsc::Sender<T>, channel: &'static str, signal: T) -> bool {
        let Some(_permit) = self.cancellation.try_begin_send() else {
            self.metrics.send_rejected(channel);
            return false;
        };

        match tx.try_send(signal) {
            Ok(()) => {
                self.metrics.signal_sent(channel);
                true
            }
            Err(e) => {
                let reason = match e {
                    TrySendError::Full(_) => "channel full",
                    TrySendError::Closed(_) => "send after close",
                };
                let violation = CoreError::channel_protocol_violation(channel, reason);
                self.metrics.protocol_violation(channel);
                log::error!("{}", violation);
                if cfg!(debug_assertions) {
                    panic!("{}", violation);
                }
                false
            }
        }
    }
}

/// Reading half, owned by the controller. Closing consumes it, so the
/// channels can only be closed once.
pub struct ResultReceiver {
    completions: mpsc::Receiver<CompletionSignal>,
    errors: mpsc::Receiver<ErrorSignal>,
    cancellation: Cancellation,
}

impl ResultReceiver {
    /// Cancel, wait out sends already in progress, then close both channels.
    pub async fn close(mut self) -> ClosedResults {
        self.cancellation.cancel();
        self.cancellation.quiesce().await;

        self.completions.close();
        self.errors.close();
        log::debug!("Result channels closed");

        ClosedResults {
            completions: self.completions,
            errors: self.errors,
        }
    }
}

/// Both channels after closing; nothing can be written to them anymore.
pub struct ClosedResults {
    completions: mpsc::Receiver<CompletionSignal>,
    errors: mpsc::Receiver<ErrorSignal>,
}

impl ClosedResults {
    /// Take every buffered signal. Never waits.
    pub fn drain(mut self) -> (Vec<CompletionSignal>, Vec<ErrorSignal>) {
        let mut completions = Vec::new();
        while let Ok(signal) = self.completions.try_recv() {
            completions.push(signal);
        }

        let mut errors = Vec::new();
        while let Ok(signal) = self.errors.try_recv() {
            errors.push(signal);
        }

        (completions, errors)
    }
}
