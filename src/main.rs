//! uptime-sentinel
//!
//! Continuous availability monitor.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                          POLL LOOP                             │
//!   │                                                                │
//!   │  ┌──────────┐   ┌──────────┐   ┌────────────┐   ┌───────────┐  │
//!   │  │ registry │──▶│  probe   │──▶│ transition │──▶│   alert   │──┼──▶ chat bot
//!   │  │ (static) │   │ (HTTP)   │   │   engine   │   │dispatcher │──┼──▶ log ingest
//!   │  └──────────┘   └──────────┘   └─────┬──────┘   └───────────┘  │
//!   │                                      │                         │
//!   │                               ┌──────▼──────┐                  │
//!   │                               │  debounce   │                  │
//!   │                               │   store     │                  │
//!   │                               └─────────────┘                  │
//!   │                                                                │
//!   │   config · observability · lifecycle                           │
//!   └────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use uptime_sentinel::config::{self, MonitorConfig};
use uptime_sentinel::lifecycle::{self, signals, Shutdown};
use uptime_sentinel::observability::logging;
use uptime_sentinel::registry::TargetRegistry;

#[derive(Parser)]
#[command(name = "uptime-sentinel")]
#[command(about = "Polls HTTP endpoints and alerts on outages and recoveries", long_about = None)]
struct Cli {
    /// TOML config file; environment variables override its values.
    #[arg(short, long, env = "SENTINEL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll forever (default)
    Run,
    /// Probe every target once and print the results as JSON
    Check,
    /// Validate the configuration and exit
    Validate,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(config).await,
        Commands::Check => check(config).await,
        Commands::Validate => validate(&config),
    }
}

async fn run(config: MonitorConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    logging::init_logging(&config.observability);
    tracing::info!("uptime-sentinel v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::init_metrics(&config);
    let monitor = lifecycle::build_monitor(&config)?;

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(monitor.run(shutdown.signal()));

    signals::wait_for_signal().await;
    shutdown.trigger();
    handle.await?;

    tracing::info!("Shutdown complete");
    Ok(ExitCode::SUCCESS)
}

async fn check(config: MonitorConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    // One-shot: report only, never alert.
    let mut config = config;
    config.notifier.enabled = false;
    config.ingest.enabled = false;

    let mut monitor = lifecycle::build_monitor(&config)?;
    let report = monitor.tick().await;
    println!("{}", serde_json::to_string_pretty(&report.statuses)?);

    Ok(if report.all_healthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn validate(config: &MonitorConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let registry = TargetRegistry::from_config(&config.targets)?;
    // Credentials stay out of the summary.
    let summary = serde_json::json!({
        "targets": registry.iter().collect::<Vec<_>>(),
        "interval_secs": config.poll.interval_secs,
        "reminder_threshold": config.poll.effective_threshold(),
        "probe_timeout_secs": config.poll.probe_timeout_secs,
        "notifier_enabled": config.notifier.enabled,
        "ingest_enabled": config.ingest.enabled,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(ExitCode::SUCCESS)
}
