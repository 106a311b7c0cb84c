use std::time::Duration;

use tokio::time::Instant;

// Fallback horizon when a timeout is too large to add to the clock
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Absolute instant bounding a shutdown run. Computed once, never moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        Self(
            now.checked_add(timeout)
                .unwrap_or_else(|| now + FAR_FUTURE),
        )
    }

    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    /// Time left until the deadline, zero once it has passed
    pub fn remaining(&self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }

    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.0
    }
}
