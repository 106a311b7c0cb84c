use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] finale_config::ConfigError),

    #[error("Shutdown error: {0}")]
    Shutdown(#[from] finale_core::CoreError),

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Failed to render outcome: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
