//! Environment overlay.
//!
//! Container deployments configure the monitor purely through environment
//! variables; anything set here wins over the config file.

use crate::config::schema::{MonitorConfig, ProxyCheckConfig};

/// Highest `URL_n` index that is read.
pub const MAX_URL_TARGETS: usize = 9;

/// Overlay environment variables onto `config`.
///
/// `lookup` resolves a variable name to its value; the binary passes
/// `std::env::var`. Empty values count as unset.
pub fn apply_env_overrides<F>(config: &mut MonitorConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    // URL_1..URL_9, stopping at the first gap.
    let mut urls = Vec::new();
    for i in 1..=MAX_URL_TARGETS {
        match get(&format!("URL_{}", i)) {
            Some(url) => urls.push(url),
            None => break,
        }
    }
    if !urls.is_empty() {
        config.targets.urls = urls;
    }

    if let Some(url) = get("EXTERNAL_PROXY_URL") {
        config.targets.external_proxy = Some(ProxyCheckConfig {
            url,
            host: get("EXTERNAL_PROXY_HOST"),
        });
    }
    if let Some(url) = get("INTERNAL_PROXY_URL") {
        config.targets.internal_proxy = Some(ProxyCheckConfig {
            url,
            host: get("INTERNAL_PROXY_HOST"),
        });
    }

    if let Some(token) = get("BOT_TOKEN") {
        config.notifier.bot_token = token;
        config.notifier.enabled = true;
    }
    if let Some(chat_id) = get("CHAT_ID") {
        config.notifier.chat_id = chat_id;
    }

    if let Some(url) = get("INGEST_URL") {
        config.ingest.url_template = url;
        config.ingest.enabled = true;
    }
    if let Some(source_id) = get("INGEST_SOURCE_ID") {
        config.ingest.source_id = source_id;
    }
    if let Some(username) = get("INGEST_USERNAME") {
        config.ingest.username = username;
    }
    if let Some(password) = get("INGEST_PASSWORD") {
        config.ingest.password = password;
    }

    if let Some(interval) = get("POLL_INTERVAL_SECS") {
        match interval.trim().parse() {
            Ok(secs) => config.poll.interval_secs = secs,
            Err(_) => tracing::warn!(value = %interval, "Ignoring invalid POLL_INTERVAL_SECS"),
        }
    }
    if let Some(threshold) = get("REMINDER_THRESHOLD") {
        match threshold.trim().parse() {
            Ok(polls) => config.poll.reminder_threshold = Some(polls),
            Err(_) => tracing::warn!(value = %threshold, "Ignoring invalid REMINDER_THRESHOLD"),
        }
    }
}
