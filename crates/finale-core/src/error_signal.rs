use crate::TaskError;

/// Sent at most once per finalizer, always before its completion signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSignal {
    pub cause: TaskError,
}

impl ErrorSignal {
    pub fn new(cause: TaskError) -> Self {
        Self { cause }
    }
}
