//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → env.rs (environment overlay: URL_n, credentials)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → registry, health, alert, monitor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the target set never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, ConfigError};
pub use schema::IngestConfig;
pub use schema::MonitorConfig;
pub use schema::NotifierConfig;
pub use schema::ObservabilityConfig;
pub use schema::ParseMode;
pub use schema::PollConfig;
pub use schema::ProxyCheckConfig;
pub use schema::TargetsConfig;
