//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (probe, alert and delivery counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields (target key, status code) on every health event
//! - `RUST_LOG` overrides the configured level
//! - Metrics are cheap and recorded even when no exporter is installed

pub mod logging;
pub mod metrics;
