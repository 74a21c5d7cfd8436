//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Registry → Prober + Dispatcher → Monitor
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Poll loop finishes its current cycle → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A cycle in progress is never interrupted; alerts already computed are
//!   still delivered

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use startup::{build_monitor, init_metrics, StartupError};
