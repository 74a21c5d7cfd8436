//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the availability monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Endpoints to monitor.
    pub targets: TargetsConfig,

    /// Poll loop cadence, probe timeout and reminder policy.
    pub poll: PollConfig,

    /// Chat notification transport.
    pub notifier: NotifierConfig,

    /// Log-ingestion transport.
    pub ingest: IngestConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// The monitored endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TargetsConfig {
    /// External reverse proxy status check.
    pub external_proxy: Option<ProxyCheckConfig>,

    /// Internal reverse proxy status check.
    pub internal_proxy: Option<ProxyCheckConfig>,

    /// Plain URL targets, checked in this order.
    pub urls: Vec<String>,
}

/// A proxy status endpoint, probed with an explicit `Host` header.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProxyCheckConfig {
    /// URL of the status endpoint.
    pub url: String,

    /// Host header sent with the probe (virtual host of the status page).
    #[serde(default)]
    pub host: Option<String>,
}

/// Poll loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    /// Pause between the end of one cycle and the start of the next.
    pub interval_secs: u64,

    /// Upper bound for a single probe, including reading the body.
    pub probe_timeout_secs: u64,

    /// Explicit number of consecutive failed polls between reminders.
    /// Takes precedence over `reminder_interval_secs`.
    pub reminder_threshold: Option<u32>,

    /// Wall-clock time between "still down" reminders.
    pub reminder_interval_secs: u64,

    /// Skip TLS certificate verification on probes.
    pub accept_invalid_certs: bool,

    /// Probe all targets of a cycle concurrently.
    pub concurrent_probes: bool,

    /// Honour HTTP(S)_PROXY / NO_PROXY from the environment.
    pub use_env_proxy: bool,
}

impl PollConfig {
    /// Number of consecutive unhealthy polls after which a reminder fires.
    ///
    /// Derived from the wall-clock reminder interval when no explicit
    /// threshold is configured, so that changing the poll interval keeps the
    /// reminder cadence.
    pub fn effective_threshold(&self) -> u32 {
        if let Some(threshold) = self.reminder_threshold {
            return threshold.max(1);
        }
        let interval = self.interval_secs.max(1);
        let polls = self.reminder_interval_secs.div_ceil(interval);
        u32::try_from(polls).unwrap_or(u32::MAX).max(1)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            probe_timeout_secs: 10,
            reminder_threshold: None,
            reminder_interval_secs: 900,
            accept_invalid_certs: true,
            concurrent_probes: false,
            use_env_proxy: true,
        }
    }
}

/// Chat notifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Send chat notifications.
    pub enabled: bool,

    /// Base URL of the bot API.
    pub api_base: String,

    /// Bot token.
    pub bot_token: String,

    /// Destination chat.
    pub chat_id: String,

    /// Formatting mode messages are rendered and escaped for.
    pub parse_mode: ParseMode,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Honour HTTP(S)_PROXY / NO_PROXY from the environment.
    pub use_env_proxy: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: "https://api.telegram.org".to_string(),
            bot_token: String::new(),
            chat_id: String::new(),
            parse_mode: ParseMode::MarkdownV2,
            timeout_secs: 10,
            use_env_proxy: true,
        }
    }
}

/// Bot API `parse_mode` of chat messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ParseMode {
    #[default]
    MarkdownV2,
    /// Legacy Markdown.
    Markdown,
    #[serde(rename = "HTML")]
    Html,
    /// No formatting; the field is omitted from the request.
    #[serde(rename = "plain", alias = "")]
    Plain,
}

impl ParseMode {
    /// Value of the `parse_mode` request field.
    pub fn as_api_str(self) -> Option<&'static str> {
        match self {
            ParseMode::MarkdownV2 => Some("MarkdownV2"),
            ParseMode::Markdown => Some("Markdown"),
            ParseMode::Html => Some("HTML"),
            ParseMode::Plain => None,
        }
    }
}

/// Log-ingestion backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Forward outage records to the ingestion backend.
    pub enabled: bool,

    /// Endpoint URL; `{source}` is replaced with `source_id`.
    pub url_template: String,

    /// Identifier of this monitor at the backend.
    pub source_id: String,

    /// Basic auth user.
    pub username: String,

    /// Basic auth password.
    pub password: String,

    /// Also forward recoveries, not only outages and reminders.
    pub include_recoveries: bool,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Honour HTTP(S)_PROXY / NO_PROXY from the environment.
    pub use_env_proxy: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url_template: String::new(),
            source_id: String::new(),
            username: String::new(),
            password: String::new(),
            include_recoveries: false,
            timeout_secs: 10,
            use_env_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
