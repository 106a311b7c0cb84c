use crate::error::{Result, ServerError};

use std::fmt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use finale_config::LoggingConfig;
use log::{Record, info};

/// Where records go. stdout carries the report, so the console sink is stderr.
pub(crate) enum Sink {
    Console(Option<ColoredLevelConfig>),
    File(File),
}

impl Sink {
    pub(crate) fn open(log_file: Option<&Path>, colored: bool) -> Result<Self> {
        let Some(path) = log_file else {
            let colors = colored.then(|| {
                ColoredLevelConfig::new()
                    .trace(Color::Magenta)
                    .debug(Color::Blue)
                    .info(Color::Green)
                    .warn(Color::Yellow)
                    .error(Color::Red)
            });
            return Ok(Sink::Console(colors));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ServerError::LogFile {
                path: parent.display().to_string(),
                source,
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(Sink::File)
            .map_err(|source| ServerError::LogFile {
                path: path.display().to_string(),
                source,
            })
    }

    fn into_dispatch(self) -> Dispatch {
        match self {
            Sink::Console(Some(colors)) => Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, colors.color(record.level()))
                })
                .chain(std::io::stderr()),
            Sink::Console(None) => Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, record.level()))
                .chain(std::io::stderr()),
            // Files get source locations; nobody reads them live
            Sink::File(file) => Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} {} {}] {} [{}:{}]",
                        humantime::format_rfc3339_millis(SystemTime::now()),
                        record.level(),
                        record.target(),
                        message,
                        record.file().unwrap_or("unknown"),
                        record.line().unwrap_or(0),
                    ))
                })
                .chain(file),
        }
    }
}

fn write_line(
    out: FormatCallback<'_>,
    message: &fmt::Arguments<'_>,
    record: &Record<'_>,
    level: impl fmt::Display,
) {
    out.finish(format_args!(
        "[{} {} {}] {}",
        humantime::format_rfc3339_millis(SystemTime::now()),
        level,
        record.target(),
        message,
    ))
}

/// Install the global logger from the `[logging]` section.
///
/// `log_file` is the resolved file path (see `Config::log_file_path`);
/// `None` logs to stderr, colored when `logging.colored` is set.
pub fn initialize(logging: &LoggingConfig, log_file: Option<&Path>) -> Result<()> {
    let level = logging.level.0;

    Dispatch::new()
        .level(level)
        .chain(Sink::open(log_file, logging.colored)?.into_dispatch())
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(path) => info!("Logging at {} to {}", level, path.display()),
        None => info!("Logging at {} to stderr", level),
    }

    Ok(())
}
