//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sentinel_probes_total` (counter): probes by target and outcome
//! - `sentinel_target_up` (gauge): 1=healthy, 0=unhealthy, per target
//! - `sentinel_alerts_total` (counter): alerts by target and kind
//! - `sentinel_dispatch_failures_total` (counter): failed deliveries by transport
//! - `sentinel_cycle_duration_seconds` (histogram): wall time of a poll cycle

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_probe(target: &str, healthy: bool) {
    let outcome = if healthy { "healthy" } else { "unhealthy" };
    counter!("sentinel_probes_total", "target" => target.to_string(), "outcome" => outcome).increment(1);
    gauge!("sentinel_target_up", "target" => target.to_string()).set(if healthy { 1.0 } else { 0.0 });
}

pub fn record_alert(target: &str, kind: &'static str) {
    counter!("sentinel_alerts_total", "target" => target.to_string(), "kind" => kind).increment(1);
}

pub fn record_dispatch_failure(transport: &'static str) {
    counter!("sentinel_dispatch_failures_total", "transport" => transport).increment(1);
}

pub fn record_cycle_duration(elapsed: Duration) {
    histogram!("sentinel_cycle_duration_seconds").record(elapsed.as_secs_f64());
}
