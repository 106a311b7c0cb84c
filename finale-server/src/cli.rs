use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "finale")]
#[command(about = "Run shutdown finalizers on interrupt, bounded by a deadline")]
#[command(version)]
pub struct Cli {
    /// Config directory (defaults to $FINALE_CONFIG_DIR, then ./.finale)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Fire the interrupt after this many milliseconds instead of waiting for Ctrl+C
    #[arg(long, value_name = "MS")]
    pub interrupt_after_ms: Option<u64>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}
