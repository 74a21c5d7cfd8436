//! Monitored targets and the ordered registry.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::config::{ProxyCheckConfig, TargetsConfig};
use crate::registry::key::{target_domain, target_key, KeyError};

/// Key of the external proxy check.
pub const EXTERNAL_PROXY_KEY: &str = "ext_pr";
/// Key of the internal proxy check.
pub const INTERNAL_PROXY_KEY: &str = "int_pr";

/// What kind of endpoint a target is; selects probe rules and message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    ExternalProxy,
    InternalProxy,
    GenericUrl,
}

impl TargetKind {
    /// Proxy checks require the literal status body.
    pub fn is_proxy(self) -> bool {
        matches!(self, TargetKind::ExternalProxy | TargetKind::InternalProxy)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::ExternalProxy => write!(f, "external_proxy"),
            TargetKind::InternalProxy => write!(f, "internal_proxy"),
            TargetKind::GenericUrl => write!(f, "url"),
        }
    }
}

/// A single monitored endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Stable key, unique within the registry.
    pub key: String,
    /// URL that is probed.
    pub url: String,
    /// Host header override (proxy checks).
    pub host_header: Option<String>,
    /// Domain reported to the ingestion backend.
    pub domain: String,
    pub kind: TargetKind,
}

impl Target {
    /// A plain URL target keyed by the leftmost label of its host.
    pub fn url(url: &str) -> Result<Self, KeyError> {
        Ok(Self {
            key: target_key(url)?,
            url: url.to_string(),
            host_header: None,
            domain: target_domain(url)?,
            kind: TargetKind::GenericUrl,
        })
    }

    /// The external proxy status check.
    pub fn external_proxy(check: &ProxyCheckConfig) -> Self {
        Self::proxy(check, EXTERNAL_PROXY_KEY, "external.proxy", TargetKind::ExternalProxy)
    }

    /// The internal proxy status check.
    pub fn internal_proxy(check: &ProxyCheckConfig) -> Self {
        Self::proxy(check, INTERNAL_PROXY_KEY, "internal.proxy", TargetKind::InternalProxy)
    }

    fn proxy(check: &ProxyCheckConfig, key: &str, domain: &str, kind: TargetKind) -> Self {
        Self {
            key: key.to_string(),
            url: check.url.clone(),
            host_header: check.host.clone().filter(|h| !h.is_empty()),
            domain: domain.to_string(),
            kind,
        }
    }
}

/// Errors raised while building the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Two targets map to the same key and would share one debounce counter.
    #[error("duplicate target key '{key}' (from '{url}')")]
    DuplicateKey { key: String, url: String },
}

/// Ordered, immutable set of monitored targets.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    /// Build a registry from explicit targets, rejecting duplicate keys.
    pub fn new(targets: Vec<Target>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for target in &targets {
            if !seen.insert(target.key.as_str()) {
                return Err(RegistryError::DuplicateKey {
                    key: target.key.clone(),
                    url: target.url.clone(),
                });
            }
        }
        Ok(Self { targets })
    }

    /// Build the registry from configuration: external proxy, internal
    /// proxy, then URL targets in configured order.
    pub fn from_config(config: &TargetsConfig) -> Result<Self, RegistryError> {
        let mut targets = Vec::with_capacity(config.urls.len() + 2);
        if let Some(check) = &config.external_proxy {
            targets.push(Target::external_proxy(check));
        }
        if let Some(check) = &config.internal_proxy {
            targets.push(Target::internal_proxy(check));
        }
        for url in &config.urls {
            let target = Target::url(url)?;
            tracing::info!(key = %target.key, url = %target.url, "New target found");
            targets.push(target);
        }
        Self::new(targets)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.key == key)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
