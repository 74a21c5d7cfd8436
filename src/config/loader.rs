//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::env::apply_env_overrides;
use crate::config::schema::MonitorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let config = read_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load configuration for the binary: an optional TOML file, overlaid with
/// the process environment, then validated.
pub fn load(path: Option<&Path>) -> Result<MonitorConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => MonitorConfig::default(),
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
