//! Availability monitor library.
//!
//! Polls HTTP(S) endpoints on a fixed interval and turns per-poll health
//! results into deduplicated alerts: one on every up/down transition, plus a
//! periodic "still down" reminder for sustained outages.

pub mod alert;
pub mod config;
pub mod health;
pub mod lifecycle;
pub mod monitor;
pub mod observability;
pub mod registry;

pub use config::MonitorConfig;
pub use lifecycle::Shutdown;
pub use monitor::Monitor;
