use crate::tests::{EnvGuard, setup_config_dir, write_config};
use crate::{Config, DEFAULT_FAILURE_THRESHOLD_MS, DEFAULT_TOTAL_TIMEOUT_MS, FinalizerConfig};

use googletest::assert_that;
use googletest::prelude::{anything, eq, len, ok};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(
        config.shutdown.total_timeout_ms,
        eq(DEFAULT_TOTAL_TIMEOUT_MS)
    );
    assert_that!(
        config.shutdown.failure_threshold_ms,
        eq(DEFAULT_FAILURE_THRESHOLD_MS)
    );
    assert_that!(config.finalizers, eq(&FinalizerConfig::defaults()));
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("nested").join(".finale");
    let _guard = EnvGuard::set("FINALE_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.exists());
}

#[test]
#[serial]
fn given_explicit_dir_when_load_from_then_env_dir_ignored() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let other = tempfile::TempDir::new().unwrap();
    std::fs::write(
        other.path().join("config.toml"),
        "[shutdown]\ntotal_timeout_ms = 4321\n",
    )
    .unwrap();

    // When
    let config = Config::load_from(other.path()).unwrap();

    // Then
    assert_that!(config.shutdown.total_timeout_ms, eq(4321));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
            [shutdown]
            total_timeout_ms = 2500
            failure_threshold_ms = 100

            [[finalizers]]
            name = "flush-cache"
            duration_ms = 20

            [[finalizers]]
            name = "close-db"
            duration_ms = 300
            may_fail = true
        "#,
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.shutdown.total_timeout_ms, eq(2500));
    assert_that!(config.shutdown.failure_threshold_ms, eq(100));
    assert_that!(config.finalizers, len(eq(2)));
    assert_that!(
        config.finalizers[1],
        eq(&FinalizerConfig::new("close-db", 300, true))
    );
    assert_that!(config.finalizers[0].may_fail, eq(false));
}

#[test]
#[serial]
fn given_toml_with_empty_finalizer_list_when_load_then_no_finalizers() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "finalizers = []\n");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.finalizers, len(eq(0)));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_env_override_when_load_then_env_wins_over_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[shutdown]\ntotal_timeout_ms = 2500\n");
    let _timeout = EnvGuard::set("FINALE_SHUTDOWN_TIMEOUT_MS", "750");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.shutdown.total_timeout_ms, eq(750));
}

#[test]
#[serial]
fn given_unparseable_env_override_when_load_then_value_unchanged() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _timeout = EnvGuard::set("FINALE_SHUTDOWN_TIMEOUT_MS", "soon");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(
        config.shutdown.total_timeout_ms,
        eq(DEFAULT_TOTAL_TIMEOUT_MS)
    );
}
