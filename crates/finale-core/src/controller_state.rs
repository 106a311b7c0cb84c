use serde::Serialize;

/// Which way a shutdown run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalPath {
    /// Every executor returned before the deadline
    Completed,
    /// The deadline fired first
    TimedOut,
}

impl TerminalPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::TimedOut => "timed_out",
        }
    }
}

/// Shutdown controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed, channels and deadline created
    Idle,
    /// Listening for the external interrupt
    AwaitingSignal,
    /// Finalizers running, racing the deadline
    Finalizing,
    /// Channels closed, collecting results
    Draining(TerminalPath),
    /// Outcome built
    Done(TerminalPath),
}

impl ControllerState {
    pub fn can_transition_to(&self, next: ControllerState) -> bool {
        use ControllerState::*;

        match (*self, next) {
            (Idle, AwaitingSignal) => true,
            (AwaitingSignal, Finalizing) => true,
            // Deadline passed before the interrupt ever arrived
            (AwaitingSignal, Draining(TerminalPath::TimedOut)) => true,
            (Finalizing, Draining(_)) => true,
            (Draining(from), Done(to)) => from == to,
            _ => false,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}
