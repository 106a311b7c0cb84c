use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_LOG_COLORED, DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_LEVEL,
    LogLevel,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Colored stderr output (ignored when logging to a file)
    pub colored: bool,
    /// Log file name inside `dir`; None logs to stderr
    pub file: Option<String>,
    /// Log directory, relative to the config directory
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(DEFAULT_LOG_LEVEL),
            colored: DEFAULT_LOG_COLORED,
            file: None,
            dir: String::from(DEFAULT_LOG_DIRECTORY),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.dir.contains("..") || std::path::Path::new(&self.dir).is_absolute() {
            return Err(ConfigError::logging(
                "logging.dir must be relative and cannot contain '..'",
            ));
        }

        if let Some(ref file) = self.file
            && (file.is_empty() || file.contains('/') || file.contains('\\'))
        {
            return Err(ConfigError::logging(format!(
                "logging.file must be a plain file name, got '{}'",
                file
            )));
        }

        Ok(())
    }
}
