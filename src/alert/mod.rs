//! Alerting subsystem.
//!
//! # Data Flow
//! ```text
//! AlertEvent (event.rs, from the transition engine)
//!     → message.rs (render chat text per target kind, escaped per parse mode)
//!     → dispatcher.rs
//!         → notifier.rs (chat bot API)
//!         → ingest.rs (log-ingestion backend)
//! ```
//!
//! # Design Decisions
//! - Fire-and-forget: transport failures are logged, never retried
//! - The two transports are independent of each other
//! - Dispatch happens after the counter has advanced; nothing is rolled back

pub mod dispatcher;
pub mod event;
pub mod ingest;
pub mod message;
pub mod notifier;

pub use dispatcher::{AlertDispatcher, Delivery, DispatchError, DispatchOutcome};
pub use event::{AlertEvent, AlertKind};
pub use ingest::{HttpIngestor, IngestRecord, Ingestor};
pub use message::{escape, format_message};
pub use notifier::{Notifier, TelegramNotifier};
