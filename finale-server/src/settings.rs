use finale_config::Config;
use finale_core::{FinalizerTask, ShutdownSettings};

/// Turn the loaded configuration into controller settings.
pub fn shutdown_settings(config: &Config) -> ShutdownSettings {
    let tasks = config
        .finalizers
        .iter()
        .map(|f| FinalizerTask::new(f.name.clone(), f.duration(), f.may_fail))
        .collect();

    ShutdownSettings::new(tasks, config.shutdown.total_timeout())
        .with_failure_threshold(config.shutdown.failure_threshold())
}
