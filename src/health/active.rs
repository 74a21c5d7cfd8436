//! Active HTTP probing.
//!
//! # Responsibilities
//! - Issue one GET per target and classify the response
//! - Enforce the per-probe timeout so a hung endpoint cannot stall the cycle
//! - Apply the proxy status page rules (Host header, literal body)

use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::config::PollConfig;
use crate::health::probe::{ProbeError, ProbeResult, Prober};
use crate::observability::metrics;
use crate::registry::Target;

/// Body served by a healthy proxy status page.
pub const PROXY_RUNNING_BODY: &str = "running";

/// Probes targets over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(config: &PollConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(concat!("uptime-sentinel/", env!("CARGO_PKG_VERSION")));
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(config.probe_timeout_secs),
        })
    }

    async fn check(&self, target: &Target) -> ProbeResult {
        let mut request = self.client.get(&target.url);
        if let Some(host) = &target.host_header {
            request = request.header(reqwest::header::HOST, host);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return ProbeResult::transport_failure(e.to_string()),
        };

        let status = response.status().as_u16();
        if !target.kind.is_proxy() {
            return if status == 200 {
                ProbeResult::healthy(status)
            } else {
                ProbeResult::unhealthy(status, ProbeError::Status(status))
            };
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return ProbeResult::transport_failure(e.to_string()),
        };

        if status != 200 {
            ProbeResult::unhealthy(status, ProbeError::Status(status))
        } else if body != PROXY_RUNNING_BODY {
            let shown: String = body.chars().take(64).collect();
            ProbeResult::unhealthy(status, ProbeError::Body(shown))
        } else {
            ProbeResult::healthy(status)
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, target: &Target) -> ProbeResult {
        tracing::debug!(key = %target.key, url = %target.url, "Checking target");

        let result = match time::timeout(self.timeout, self.check(target)).await {
            Ok(result) => result,
            Err(_) => ProbeResult::timed_out(self.timeout.as_secs()),
        };

        if let Some(error) = &result.error {
            tracing::debug!(
                key = %target.key,
                status = result.status_code,
                error = %error,
                "Health check failed"
            );
        }
        metrics::record_probe(&target.key, result.healthy);

        result
    }
}
