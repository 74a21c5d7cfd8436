//! Alert events emitted by the transition engine.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::registry::{Target, TargetKind};

/// What happened to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Healthy → unhealthy.
    WentDown,
    /// Still unhealthy after a full reminder period.
    StillDown,
    /// Unhealthy → healthy.
    Recovered,
}

impl AlertKind {
    pub fn is_outage(self) -> bool {
        !matches!(self, AlertKind::Recovered)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::WentDown => "went_down",
            AlertKind::StillDown => "still_down",
            AlertKind::Recovered => "recovered",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single alert, produced and consumed within one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertEvent {
    pub target_key: String,
    pub domain: String,
    pub target_kind: TargetKind,
    pub kind: AlertKind,
    pub response_code: u16,
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(target: &Target, kind: AlertKind, response_code: u16, timestamp: DateTime<Utc>) -> Self {
        Self {
            target_key: target.key.clone(),
            domain: target.domain.clone(),
            target_kind: target.kind,
            kind,
            response_code,
            timestamp,
        }
    }

    /// Timestamp as RFC 3339 with second precision.
    pub fn rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}
