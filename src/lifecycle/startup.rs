//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the target registry and seed one debounce counter per target
//! - Construct the HTTP prober and the alert transports
//! - Start the metrics exporter when enabled

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::alert::AlertDispatcher;
use crate::config::MonitorConfig;
use crate::health::{HttpProber, ProbeMode, TransitionEngine};
use crate::monitor::Monitor;
use crate::observability::metrics;
use crate::registry::{RegistryError, TargetRegistry};

/// Fatal errors while assembling the monitor.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid targets: {0}")]
    Registry(#[from] RegistryError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Assemble a [`Monitor`] from a validated configuration.
pub fn build_monitor(config: &MonitorConfig) -> Result<Monitor, StartupError> {
    let registry = TargetRegistry::from_config(&config.targets)?;
    let prober = HttpProber::new(&config.poll)?;
    let dispatcher = AlertDispatcher::from_config(config)?;
    let engine = TransitionEngine::new(config.poll.effective_threshold());
    let mode = if config.poll.concurrent_probes {
        ProbeMode::Concurrent
    } else {
        ProbeMode::Sequential
    };

    tracing::info!(
        targets = registry.len(),
        interval_secs = config.poll.interval_secs,
        reminder_threshold = engine.threshold(),
        probe_timeout_secs = config.poll.probe_timeout_secs,
        concurrent = config.poll.concurrent_probes,
        "Monitor configured"
    );

    Ok(Monitor::new(
        registry,
        engine,
        Arc::new(prober),
        dispatcher,
        Duration::from_secs(config.poll.interval_secs),
    )
    .with_probe_mode(mode))
}

/// Start the metrics exporter if enabled. Must run inside the runtime.
pub fn init_metrics(config: &MonitorConfig) {
    if !config.observability.metrics_enabled {
        return;
    }
    match config.observability.metrics_address.parse() {
        Ok(addr) => metrics::init_metrics(addr),
        Err(_) => tracing::error!(
            metrics_address = %config.observability.metrics_address,
            "Failed to parse metrics address"
        ),
    }
}
