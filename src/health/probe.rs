//! Probe results and the probe capability.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::registry::Target;

/// Status code reported when the request could not be sent or the body
/// could not be read.
pub const TRANSPORT_FAILURE_CODE: u16 = 1;

/// Status code reported when the probe exceeded its timeout.
pub const TIMEOUT_CODE: u16 = 2;

/// Why a probe came back unhealthy.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum ProbeError {
    /// Connection, TLS or request failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// No complete response within the probe timeout.
    #[error("probe timed out after {0} seconds")]
    Timeout(u64),

    /// The endpoint answered with something other than 200.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The status page answered 200 with the wrong body (or none at all).
    #[error("unexpected body: {0}")]
    Body(String),
}

/// Outcome of a single health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub healthy: bool,
    /// HTTP status, or one of the reserved codes for failures without one.
    pub status_code: u16,
    pub error: Option<ProbeError>,
}

impl ProbeResult {
    pub fn healthy(status_code: u16) -> Self {
        Self {
            healthy: true,
            status_code,
            error: None,
        }
    }

    pub fn unhealthy(status_code: u16, error: ProbeError) -> Self {
        Self {
            healthy: false,
            status_code,
            error: Some(error),
        }
    }

    pub fn transport_failure(reason: impl Into<String>) -> Self {
        Self::unhealthy(TRANSPORT_FAILURE_CODE, ProbeError::Transport(reason.into()))
    }

    pub fn timed_out(timeout_secs: u64) -> Self {
        Self::unhealthy(TIMEOUT_CODE, ProbeError::Timeout(timeout_secs))
    }
}

/// Something that can check a target.
///
/// Probing never fails: every failure cause is folded into an unhealthy
/// [`ProbeResult`] carrying a status code.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &Target) -> ProbeResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let ok = ProbeResult::healthy(200);
        assert!(ok.healthy);
        assert!(ok.error.is_none());

        let t = ProbeResult::timed_out(10);
        assert!(!t.healthy);
        assert_eq!(t.status_code, TIMEOUT_CODE);
        assert_eq!(t.error.unwrap().to_string(), "probe timed out after 10 seconds");

        let f = ProbeResult::transport_failure("connection refused");
        assert_eq!(f.status_code, TRANSPORT_FAILURE_CODE);
        assert_ne!(TRANSPORT_FAILURE_CODE, TIMEOUT_CODE);
    }
}
