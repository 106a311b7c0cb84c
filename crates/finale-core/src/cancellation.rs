use crate::CancellationGuard;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Notify, broadcast};

// High bit marks cancellation, the remaining bits count in-flight sends.
const CANCELLED: usize = 1 << (usize::BITS - 1);
const IN_FLIGHT_MASK: usize = !CANCELLED;

/// Cancellation flag shared by the controller and every executor.
///
/// The flag and the in-flight send counter live in one atomic word, so a
/// send is registered with a compare-and-swap that only succeeds while the
/// flag is clear. Once `cancel()` returns, no new send can begin, and
/// `quiesce()` waits out the ones that already began.
#[derive(Clone)]
pub struct Cancellation {
    inner: Arc<CancellationState>,
}

pub(crate) struct CancellationState {
    word: AtomicUsize,
    idle: Notify,
    wake_tx: broadcast::Sender<()>,
}

impl Cancellation {
    pub fn new() -> Self {
        let (wake_tx, _) = broadcast::channel(1);
        Self {
            inner: Arc::new(CancellationState {
                word: AtomicUsize::new(0),
                idle: Notify::new(),
                wake_tx,
            }),
        }
    }

    /// Set the flag and wake sleeping executors. Returns true only for the
    /// call that actually cancelled.
    pub fn cancel(&self) -> bool {
        let previous = self.inner.word.fetch_or(CANCELLED, Ordering::AcqRel);
        if previous & CANCELLED != 0 {
            return false;
        }

        log::debug!(
            "Cancellation signaled with {} send(s) in flight",
            previous & IN_FLIGHT_MASK
        );
        let _ = self.inner.wake_tx.send(());
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.word.load(Ordering::Acquire) & CANCELLED != 0
    }

    /// Register a send attempt. None once cancellation has been signaled.
    pub fn try_begin_send(&self) -> Option<SendPermit> {
        let mut current = self.inner.word.load(Ordering::Acquire);
        loop {
            if current & CANCELLED != 0 {
                return None;
            }

            match self.inner.word.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    return Some(SendPermit {
                        state: Arc::clone(&self.inner),
                    });
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// Number of send permits currently held
    pub fn in_flight(&self) -> usize {
        self.inner.word.load(Ordering::Acquire) & IN_FLIGHT_MASK
    }

    /// Wait until every outstanding send permit has been released.
    pub async fn quiesce(&self) {
        loop {
            let idle = self.inner.idle.notified();
            if self.in_flight() == 0 {
                return;
            }
            idle.await;
        }
    }

    pub fn subscribe(&self) -> CancellationGuard {
        CancellationGuard::new(self)
    }

    pub(crate) fn wake_receiver(&self) -> broadcast::Receiver<()> {
        self.inner.wake_tx.subscribe()
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a send was registered before cancellation. Dropping it ends
/// the in-flight window.
pub struct SendPermit {
    state: Arc<CancellationState>,
}

impl Drop for SendPermit {
    fn drop(&mut self) {
        let previous = self.state.word.fetch_sub(1, Ordering::AcqRel);
        if previous & IN_FLIGHT_MASK == 1 {
            self.state.idle.notify_waiters();
        }
    }
}
