//! Alert fan-out to the notification and ingestion transports.

use std::sync::Arc;

use thiserror::Error;

use crate::alert::event::AlertEvent;
use crate::alert::ingest::{HttpIngestor, IngestRecord, Ingestor};
use crate::alert::message::format_message;
use crate::alert::notifier::{Notifier, TelegramNotifier};
use crate::config::{MonitorConfig, ParseMode};
use crate::observability::metrics;

/// Failure of an alert transport. Logged, never propagated to the engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Request(String),

    /// The transport answered with a non-success status.
    #[error("transport returned status {0}")]
    Status(u16),
}

/// What happened to one leg of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Transport not configured, or not applicable to this event.
    Skipped,
    Delivered,
    Failed(DispatchError),
}

/// Result of dispatching a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub notify: Delivery,
    pub ingest: Delivery,
}

/// Formats events and forwards them to the configured transports.
#[derive(Clone, Default)]
pub struct AlertDispatcher {
    notifier: Option<Arc<dyn Notifier>>,
    ingestor: Option<Arc<dyn Ingestor>>,
    include_recoveries: bool,
}

impl AlertDispatcher {
    /// A dispatcher that only logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the transports enabled in `config`.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, reqwest::Error> {
        let mut dispatcher = Self::new();
        if config.notifier.enabled {
            dispatcher = dispatcher.with_notifier(Arc::new(TelegramNotifier::new(&config.notifier)?));
        } else {
            tracing::info!("Chat notifications disabled");
        }
        if config.ingest.enabled {
            dispatcher = dispatcher.with_ingestor(
                Arc::new(HttpIngestor::new(&config.ingest)?),
                config.ingest.include_recoveries,
            );
        }
        Ok(dispatcher)
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// `include_recoveries`: forward recoveries too, not only outages.
    pub fn with_ingestor(mut self, ingestor: Arc<dyn Ingestor>, include_recoveries: bool) -> Self {
        self.ingestor = Some(ingestor);
        self.include_recoveries = include_recoveries;
        self
    }

    /// Deliver one event. Both legs run regardless of each other's outcome;
    /// failures are logged and reported in the outcome only.
    pub async fn dispatch(&self, event: &AlertEvent) -> DispatchOutcome {
        let message = format_message(event, ParseMode::Plain);
        if event.kind.is_outage() {
            tracing::warn!(
                key = %event.target_key,
                kind = %event.kind,
                code = event.response_code,
                "{}",
                message
            );
        } else {
            tracing::info!(key = %event.target_key, kind = %event.kind, "{}", message);
        }
        metrics::record_alert(&event.target_key, event.kind.as_str());

        let notify = match &self.notifier {
            Some(notifier) => match notifier
                .notify(&format_message(event, notifier.parse_mode()))
                .await
            {
                Ok(()) => Delivery::Delivered,
                Err(e) => {
                    tracing::error!(key = %event.target_key, error = %e, "Failed to send notification");
                    metrics::record_dispatch_failure("notify");
                    Delivery::Failed(e)
                }
            },
            None => Delivery::Skipped,
        };

        let ingest = match &self.ingestor {
            Some(ingestor) if event.kind.is_outage() || self.include_recoveries => {
                let record = IngestRecord {
                    domain: event.domain.clone(),
                    response_code: event.response_code.to_string(),
                    time: event.rfc3339(),
                };
                match ingestor.ingest(&record).await {
                    Ok(()) => Delivery::Delivered,
                    Err(e) => {
                        tracing::error!(domain = %event.domain, error = %e, "Failed to forward log record");
                        metrics::record_dispatch_failure("ingest");
                        Delivery::Failed(e)
                    }
                }
            }
            _ => Delivery::Skipped,
        };

        DispatchOutcome { notify, ingest }
    }
}

impl std::fmt::Debug for AlertDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertDispatcher")
            .field("notifier", &self.notifier.is_some())
            .field("ingestor", &self.ingestor.is_some())
            .field("include_recoveries", &self.include_recoveries)
            .finish()
    }
}
