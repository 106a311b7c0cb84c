/// Sent at most once per finalizer, after its work is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSignal {
    pub task_name: String,
}

impl CompletionSignal {
    pub fn new<S: Into<String>>(task_name: S) -> Self {
        Self {
            task_name: task_name.into(),
        }
    }
}
