use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;

const UNRESOLVED: u64 = u64::MAX;

/// Counting barrier over executors (wait-group style).
///
/// Each executor holds a `JoinTicket`; the barrier resolves when every
/// ticket has been dropped. Issue all tickets before handing any of them
/// out, otherwise an early finisher can resolve the barrier prematurely.
#[derive(Clone)]
pub struct JoinBarrier {
    inner: Arc<BarrierState>,
}

struct BarrierState {
    outstanding: AtomicUsize,
    issued: AtomicBool,
    created_at: Instant,
    /// Nanoseconds after `created_at` when the count last reached zero
    resolved_after_nanos: AtomicU64,
    resolved: Notify,
}

impl JoinBarrier {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BarrierState {
                outstanding: AtomicUsize::new(0),
                issued: AtomicBool::new(false),
                created_at: Instant::now(),
                resolved_after_nanos: AtomicU64::new(UNRESOLVED),
                resolved: Notify::new(),
            }),
        }
    }

    /// Register one executor
    pub fn ticket(&self) -> JoinTicket {
        self.inner.issued.store(true, Ordering::Release);
        self.inner.outstanding.fetch_add(1, Ordering::AcqRel);
        JoinTicket {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Executors that have not returned yet
    pub fn remaining(&self) -> usize {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Wait for every executor to return. Yields the instant the barrier
    /// resolved, which is the creation instant if no ticket was issued.
    pub async fn wait(&self) -> Instant {
        loop {
            let resolved = self.inner.resolved.notified();
            if self.remaining() == 0 {
                if let Some(at) = self.resolved_at() {
                    return at;
                }
                if !self.inner.issued.load(Ordering::Acquire) {
                    return self.inner.created_at;
                }
                // The last ticket is still stamping; its notify wakes us.
            }
            resolved.await;
        }
    }

    fn resolved_at(&self) -> Option<Instant> {
        match self.inner.resolved_after_nanos.load(Ordering::Acquire) {
            UNRESOLVED => None,
            nanos => Some(self.inner.created_at + Duration::from_nanos(nanos)),
        }
    }
}

impl Default for JoinBarrier {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by one executor for as long as it runs; dropping it (including
/// during a panic unwind) marks the executor returned.
pub struct JoinTicket {
    inner: Arc<BarrierState>,
}

impl Drop for JoinTicket {
    fn drop(&mut self) {
        if self.inner.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            let elapsed = self.inner.created_at.elapsed().as_nanos();
            self.inner
                .resolved_after_nanos
                .store(u64::try_from(elapsed).unwrap_or(UNRESOLVED - 1), Ordering::Release);
            self.inner.resolved.notify_waiters();
        }
    }
}
