//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval, timeout, reminder threshold)
//! - Check that every target URL has a host and yields a unique key
//! - Check that enabled transports carry their credentials
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::{MonitorConfig, ProxyCheckConfig};
use crate::registry::{target_domain, target_key, EXTERNAL_PROXY_KEY, INTERNAL_PROXY_KEY};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("poll.interval_secs must be greater than 0")]
    ZeroInterval,

    #[error("poll.probe_timeout_secs must be greater than 0")]
    ZeroProbeTimeout,

    #[error("poll.reminder_threshold must be at least 1")]
    ZeroThreshold,

    #[error("no targets configured")]
    NoTargets,

    #[error("target '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    #[error("targets '{first}' and '{second}' share the key '{key}'")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("notifier.{0} is required when the notifier is enabled")]
    MissingNotifierField(&'static str),

    #[error("ingest.{0} is required when ingestion is enabled")]
    MissingIngestField(&'static str),

    #[error("ingest.url_template must contain a '{{source}}' placeholder")]
    MissingSourcePlaceholder,

    #[error("unknown log format '{0}' (expected 'pretty' or 'json')")]
    UnknownLogFormat(String),
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let poll = &config.poll;
    if poll.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if poll.probe_timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }
    if poll.reminder_threshold == Some(0) {
        errors.push(ValidationError::ZeroThreshold);
    }

    validate_targets(config, &mut errors);

    let notifier = &config.notifier;
    if notifier.enabled {
        if notifier.bot_token.trim().is_empty() {
            errors.push(ValidationError::MissingNotifierField("bot_token"));
        }
        if notifier.chat_id.trim().is_empty() {
            errors.push(ValidationError::MissingNotifierField("chat_id"));
        }
    }

    let ingest = &config.ingest;
    if ingest.enabled {
        if ingest.url_template.trim().is_empty() {
            errors.push(ValidationError::MissingIngestField("url_template"));
        } else if !ingest.url_template.contains("{source}") {
            errors.push(ValidationError::MissingSourcePlaceholder);
        }
        if ingest.source_id.trim().is_empty() {
            errors.push(ValidationError::MissingIngestField("source_id"));
        }
    }

    let format = config.observability.log_format.as_str();
    if format != "pretty" && format != "json" {
        errors.push(ValidationError::UnknownLogFormat(format.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_targets(config: &MonitorConfig, errors: &mut Vec<ValidationError>) {
    let targets = &config.targets;
    if targets.external_proxy.is_none() && targets.internal_proxy.is_none() && targets.urls.is_empty() {
        errors.push(ValidationError::NoTargets);
        return;
    }

    let mut seen: HashMap<String, String> = HashMap::new();
    let proxies = [
        (EXTERNAL_PROXY_KEY, &targets.external_proxy),
        (INTERNAL_PROXY_KEY, &targets.internal_proxy),
    ];
    for (key, check) in proxies {
        if let Some(ProxyCheckConfig { url, .. }) = check {
            if let Err(e) = target_domain(url) {
                errors.push(ValidationError::InvalidTarget {
                    url: url.clone(),
                    reason: e.to_string(),
                });
            }
            seen.insert(key.to_string(), url.clone());
        }
    }

    for url in &targets.urls {
        match target_key(url) {
            Ok(key) => {
                if let Some(first) = seen.get(&key) {
                    errors.push(ValidationError::DuplicateKey {
                        key,
                        first: first.clone(),
                        second: url.clone(),
                    });
                } else {
                    seen.insert(key, url.clone());
                }
            }
            Err(e) => errors.push(ValidationError::InvalidTarget {
                url: url.clone(),
                reason: e.to_string(),
            }),
        }
    }
}
