mod config;
mod error;
mod finalizer_config;
mod log_level;
mod logging_config;
mod shutdown_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use finalizer_config::FinalizerConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use shutdown_config::ShutdownConfig;

const CONFIG_DIR_ENV: &str = "FINALE_CONFIG_DIR";
const DEFAULT_CONFIG_DIRECTORY: &str = ".finale";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

// Shutdown constraints
pub const MIN_TOTAL_TIMEOUT_MS: u64 = 1;
pub const MAX_TOTAL_TIMEOUT_MS: u64 = 3_600_000;
pub const DEFAULT_TOTAL_TIMEOUT_MS: u64 = 10_000;

pub const MAX_FAILURE_THRESHOLD_MS: u64 = 3_600_000;
pub const DEFAULT_FAILURE_THRESHOLD_MS: u64 = 2_000;

// Finalizer constraints
pub const MAX_FINALIZER_DURATION_MS: u64 = 86_400_000;
