use finale_server::error::Result;
use finale_server::{Cli, Reporter, exit_code, interrupt_source, logger, shutdown_settings};

use finale_core::ShutdownController;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::info;

// Stand-in for the real work a service does until it is asked to stop
const WORK_TICK: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("finale: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Load and validate configuration
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => finale_config::Config::config_dir()?,
    };
    let config = finale_config::Config::load_from(&config_dir)?;
    config.validate()?;

    // Initialize logger (before any other logging)
    let log_file = config.log_file_path(&config_dir);
    logger::initialize(&config.logging, log_file.as_deref())?;

    info!("Starting finale v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let controller = ShutdownController::new(shutdown_settings(&config))?;
    controller.start(interrupt_source(cli.interrupt_after_ms))?;
    info!("Waiting for interrupt (Ctrl+C)");

    // Keep "working" until the controller is done
    let completion = controller.await_completion();
    tokio::pin!(completion);
    let mut ticker = tokio::time::interval(WORK_TICK);

    let outcome = loop {
        tokio::select! {
            outcome = &mut completion => break outcome,
            _ = ticker.tick() => info!("Simulating work ({:?})", controller.state()),
        }
    };

    Reporter::new(cli.json).report(&outcome, controller.tasks())?;

    Ok(exit_code(&outcome))
}
