use finale_core::{
    ControllerState, FinalizerTask, Interrupt, Outcome, ShutdownController, ShutdownSettings,
    TaskError, TerminalPath,
};

use std::collections::BTreeSet;

use tokio::time::{Duration, Instant};

fn task(name: &str, duration_ms: u64, may_fail: bool) -> FinalizerTask {
    FinalizerTask::new(name, Duration::from_millis(duration_ms), may_fail)
}

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|name| name.to_string()).collect()
}

async fn run(tasks: Vec<FinalizerTask>, timeout_ms: u64) -> (ShutdownController, Outcome) {
    let controller =
        ShutdownController::new(ShutdownSettings::new(tasks, Duration::from_millis(timeout_ms)))
            .unwrap();
    controller.start(Interrupt::immediate()).unwrap();
    let outcome = controller.await_completion().await;
    (controller, outcome)
}

#[tokio::test(start_paused = true)]
async fn given_fast_slow_and_erroring_finalizers_when_interrupted_then_all_complete_with_one_error()
{
    // Given
    let tasks = vec![
        task("fast", 1, false),
        task("slow", 1_000, false),
        task("erroring", 5_000, true),
    ];

    // When
    let (controller, outcome) = run(tasks, 10_000).await;

    // Then
    assert_eq!(outcome.completed(), &names(&["fast", "slow", "erroring"]));
    assert_eq!(outcome.errors(), &[TaskError::finalize_failed("erroring")]);
    assert!(!outcome.timed_out());
    assert!(outcome.unaccounted(controller.tasks()).is_empty());
    assert_eq!(
        controller.state(),
        ControllerState::Done(TerminalPath::Completed)
    );
}

#[tokio::test(start_paused = true)]
async fn given_finalizer_outliving_deadline_when_interrupted_then_timed_out_without_it() {
    // Given
    let tasks = vec![task("fast", 1, false), task("never", 100_000, true)];
    let start = Instant::now();

    // When
    let (controller, outcome) = run(tasks, 10_000).await;

    // Then
    assert_eq!(outcome.completed(), &names(&["fast"]));
    assert!(outcome.errors().is_empty());
    assert!(outcome.timed_out());
    assert_eq!(outcome.unaccounted(controller.tasks()), vec!["never"]);
    assert_eq!(Instant::now() - start, Duration::from_millis(10_000));
    assert_eq!(
        controller.state(),
        ControllerState::Done(TerminalPath::TimedOut)
    );
}

#[tokio::test(start_paused = true)]
async fn given_no_finalizers_when_interrupted_then_completes_at_once() {
    // Given
    let start = Instant::now();

    // When
    let (_controller, outcome) = run(Vec::new(), 1_000).await;

    // Then
    assert!(outcome.completed().is_empty());
    assert!(outcome.errors().is_empty());
    assert!(!outcome.timed_out());
    assert!(outcome.is_clean());
    assert_eq!(Instant::now(), start);
}

#[tokio::test(start_paused = true)]
async fn given_finished_run_when_outcome_serialized_then_errors_rendered_as_messages() {
    // Given
    let tasks = vec![task("fast", 1, false), task("erroring", 3_000, true)];
    let (_controller, outcome) = run(tasks, 10_000).await;

    // When
    let json = serde_json::to_value(&outcome).unwrap();

    // Then
    assert_eq!(
        json,
        serde_json::json!({
            "completed": ["erroring", "fast"],
            "errors": ["erroring: didn't finalize"],
            "timed_out": false,
        })
    );
}
