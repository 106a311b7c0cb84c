use std::time::Duration;

use finale_core::Interrupt;
use log::{error, info};

/// Ctrl+C, or a timer when `after_ms` is given (unattended runs).
pub fn interrupt_source(after_ms: Option<u64>) -> Interrupt {
    match after_ms {
        Some(ms) => Interrupt::from_future(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            info!("Simulated interrupt after {}ms, initiating graceful shutdown", ms);
        }),
        None => Interrupt::from_future(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => {
                    error!("Failed to listen for SIGINT: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        }),
    }
}
