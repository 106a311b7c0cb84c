use thiserror::Error;

/// Business-level failure reported by a finalizer. Recorded in the
/// outcome, never fatal to the shutdown run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("{task}: didn't finalize")]
    FinalizeFailed { task: String },
}

impl TaskError {
    pub fn finalize_failed<S: Into<String>>(task: S) -> Self {
        Self::FinalizeFailed { task: task.into() }
    }

    /// Name of the finalizer that raised this error
    pub fn task(&self) -> &str {
        match self {
            Self::FinalizeFailed { task } => task,
        }
    }
}
