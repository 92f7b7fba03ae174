//! Observability subsystem for hookgate
//!
//! - Structured logging (JSON, one line per event)
//! - Engine metrics (atomic counters)
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. Logging failure never fails a transaction
//! 3. Deterministic output for identical inputs
//!
//! # Usage
//!
//! ```ignore
//! use hookgate::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::TxCommitted, &[("tx_id", "...")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{EngineMetrics, MetricsSnapshot};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
