use crate::Cancellation;

use tokio::sync::broadcast;

/// Helper for executors waiting on cancellation while they work
pub struct CancellationGuard {
    cancellation: Cancellation,
    wake_rx: broadcast::Receiver<()>,
}

impl CancellationGuard {
    pub fn new(cancellation: &Cancellation) -> Self {
        Self {
            wake_rx: cancellation.wake_receiver(),
            cancellation: cancellation.clone(),
        }
    }

    /// Wait for cancellation
    pub async fn wait(&mut self) {
        if self.cancellation.is_cancelled() {
            return;
        }
        let _ = self.wake_rx.recv().await;
    }

    /// Poll for cancellation (non-blocking)
    pub fn poll_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
