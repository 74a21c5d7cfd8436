//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Poll cycle (cycle.rs):
//!     For each target in registry order
//!     → Probe it (probe.rs trait, active.rs over HTTP)
//!     → Feed the result to engine.rs
//!     → Collect alert events
//!
//! State machine (engine.rs + state.rs):
//!     Healthy → Unhealthy{0} → ... → Unhealthy{t-2} → Reminded
//!     Edge-triggered: alerts only on transitions and reminders
//! ```
//!
//! # Design Decisions
//! - Probing never fails; every error becomes an unhealthy result with a code
//! - Each probe is bounded by a timeout
//! - The engine never looks at why a probe failed, only at `healthy`
//! - Counters are advanced before alerts are delivered

pub mod active;
pub mod cycle;
pub mod engine;
pub mod probe;
pub mod state;

pub use active::HttpProber;
pub use cycle::{run_cycle, run_cycle_report, CycleReport, ProbeMode, TargetStatus};
pub use engine::{Transition, TransitionEngine};
pub use probe::{ProbeError, ProbeResult, Prober};
pub use state::{Debounce, DebounceStore};
