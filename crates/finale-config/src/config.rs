use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIRECTORY,
    FinalizerConfig, LoggingConfig, ShutdownConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shutdown: ShutdownConfig,
    pub finalizers: Vec<FinalizerConfig>,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shutdown: ShutdownConfig::default(),
            finalizers: FinalizerConfig::defaults(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for FINALE_CONFIG_DIR env var, else use ./.finale/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply FINALE_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        Self::load_from(&Self::config_dir()?)
    }

    /// Load from an explicit config directory, skipping FINALE_CONFIG_DIR.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: FINALE_CONFIG_DIR env var > ./.finale/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.shutdown.validate()?;
        FinalizerConfig::validate_all(&self.finalizers)?;
        self.logging.validate()?;

        Ok(())
    }

    /// Path of the log file inside `config_dir`, if file logging is configured.
    pub fn log_file_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.logging
            .file
            .as_ref()
            .map(|filename| config_dir.join(&self.logging.dir).join(filename))
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  shutdown: timeout={}ms, failure_threshold={}ms",
            self.shutdown.total_timeout_ms, self.shutdown.failure_threshold_ms
        );
        info!("  finalizers: {}", self.finalizers.len());
        for finalizer in &self.finalizers {
            info!(
                "    {} ({}ms{})",
                finalizer.name,
                finalizer.duration_ms,
                if finalizer.may_fail { ", may fail" } else { "" }
            );
        }
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Shutdown
        Self::apply_env_parse(
            "FINALE_SHUTDOWN_TIMEOUT_MS",
            &mut self.shutdown.total_timeout_ms,
        );
        Self::apply_env_parse(
            "FINALE_FAILURE_THRESHOLD_MS",
            &mut self.shutdown.failure_threshold_ms,
        );

        // Logging
        Self::apply_env_parse("FINALE_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("FINALE_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("FINALE_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("FINALE_LOG_DIR", &mut self.logging.dir);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
