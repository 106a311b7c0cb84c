use crate::shutdown_settings;

use std::time::Duration;

use finale_config::{Config, FinalizerConfig};
use googletest::assert_that;
use googletest::prelude::{eq, len, ok, anything};

#[test]
fn given_default_config_when_converted_then_tasks_match_finalizers() {
    // Given
    let config = Config::default();

    // When
    let settings = shutdown_settings(&config);

    // Then
    assert_that!(settings.tasks, len(eq(config.finalizers.len())));
    for (task, finalizer) in settings.tasks.iter().zip(&config.finalizers) {
        assert_that!(task.name(), eq(finalizer.name.as_str()));
        assert_that!(task.simulated_duration(), eq(finalizer.duration()));
        assert_that!(task.may_fail(), eq(finalizer.may_fail));
    }
    assert_that!(settings.validate(), ok(anything()));
}

#[test]
fn given_custom_timings_when_converted_then_durations_carried_over() {
    // Given
    let mut config = Config::default();
    config.shutdown.total_timeout_ms = 3_000;
    config.shutdown.failure_threshold_ms = 500;
    config.finalizers = vec![FinalizerConfig::new("flush", 750, true)];

    // When
    let settings = shutdown_settings(&config);

    // Then
    assert_that!(settings.total_timeout, eq(Duration::from_millis(3_000)));
    assert_that!(settings.failure_threshold, eq(Duration::from_millis(500)));
    assert_that!(settings.tasks, len(eq(1)));
    assert_that!(settings.tasks[0].fails_past(settings.failure_threshold), eq(true));
}

#[test]
fn given_empty_finalizer_list_when_converted_then_settings_still_valid() {
    // Given
    let mut config = Config::default();
    config.finalizers.clear();

    // When
    let settings = shutdown_settings(&config);

    // Then
    assert_that!(settings.tasks, len(eq(0)));
    assert_that!(settings.validate(), ok(anything()));
}
