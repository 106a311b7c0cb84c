use crate::{Deadline, JoinBarrier, TerminalPath};

use tokio::time::sleep_until;

/// Which side of the race resolved first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    BarrierResolved,
    DeadlineFired,
}

impl GuardVerdict {
    pub fn terminal_path(&self) -> TerminalPath {
        match self {
            Self::BarrierResolved => TerminalPath::Completed,
            Self::DeadlineFired => TerminalPath::TimedOut,
        }
    }
}

/// Races the join barrier against the deadline. Observes only.
pub struct DeadlineGuard {
    deadline: Deadline,
}

impl DeadlineGuard {
    pub fn new(deadline: Deadline) -> Self {
        Self { deadline }
    }

    pub async fn race(&self, barrier: &JoinBarrier) -> GuardVerdict {
        tokio::select! {
            biased;
            resolved_at = barrier.wait() => {
                // Executors that gave up at the deadline also resolve the
                // barrier, so the barrier only wins if it beat the deadline.
                if resolved_at < self.deadline.instant() {
                    GuardVerdict::BarrierResolved
                } else {
                    GuardVerdict::DeadlineFired
                }
            }
            _ = sleep_until(self.deadline.instant()) => GuardVerdict::DeadlineFired,
        }
    }
}
