//! Target registry subsystem.
//!
//! # Data Flow
//! ```text
//! MonitorConfig.targets
//!     → key.rs (derive stable keys from URLs)
//!     → target.rs (Target + ordered TargetRegistry)
//!     → health (probed in registry order every cycle)
//! ```
//!
//! # Design Decisions
//! - Registry is built once at startup and never changes
//! - Proxy checks use fixed synthetic keys; URL targets are keyed by the
//!   leftmost label of their host
//! - Order is external proxy, internal proxy, then URLs as configured

pub mod key;
pub mod target;

pub use key::{target_domain, target_key, KeyError};
pub use target::{RegistryError, Target, TargetKind, TargetRegistry, EXTERNAL_PROXY_KEY, INTERNAL_PROXY_KEY};
