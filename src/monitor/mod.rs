//! Poll loop.
//!
//! # Data Flow
//! ```text
//! loop {
//!     health::run_cycle_report (probe all targets, advance counters)
//!     → alert::AlertDispatcher (one dispatch per event, in order)
//!     → sleep(interval) or shutdown
//! }
//! ```
//!
//! # Design Decisions
//! - The monitor owns the debounce store; nothing else can touch it
//! - Cycles never overlap: the sleep starts after dispatch finishes
//! - A failing transport or unreachable target never ends the loop

pub mod poll;

pub use poll::Monitor;
