pub mod cli;
pub mod error;
pub mod logger;
pub mod reporter;
pub mod settings;
pub mod signal;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use error::{Result, ServerError};
pub use reporter::{Reporter, exit_code};
pub use settings::shutdown_settings;
pub use signal::interrupt_source;
