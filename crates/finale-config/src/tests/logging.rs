use crate::tests::{EnvGuard, setup_config_dir};
use crate::{Config, LogLevel};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, none, ok, some};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Logging Tests
// =========================================================================

#[test]
fn given_unknown_level_when_parsed_then_defaults_to_info() {
    // When
    let level = LogLevel::from_str("chatty").unwrap();

    // Then
    assert_that!(level, eq(LogLevel(LevelFilter::Info)));
}

#[test]
fn given_uppercase_level_when_parsed_then_matches() {
    // When
    let level = LogLevel::from_str("DEBUG").unwrap();

    // Then
    assert_that!(level, eq(LogLevel(LevelFilter::Debug)));
}

#[test]
#[serial]
fn given_log_level_env_when_load_then_level_applied() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _level = EnvGuard::set("FINALE_LOG_LEVEL", "warn");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(*config.logging.level, eq(LevelFilter::Warn));
}

#[test]
#[serial]
fn given_no_log_file_when_log_file_path_then_none() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.log_file_path(&Config::config_dir().unwrap()), none());
}

#[test]
#[serial]
fn given_log_file_env_when_log_file_path_then_inside_log_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("FINALE_LOG_FILE", "finale.log");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(
        config.log_file_path(temp.path()),
        some(eq(&temp.path().join("log").join("finale.log")))
    );
}

#[test]
#[serial]
fn given_log_file_with_separator_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("FINALE_LOG_FILE", "sub/finale.log");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_relative_log_dir_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _dir = EnvGuard::set("FINALE_LOG_DIR", "logs/run");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
}
