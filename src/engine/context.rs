//! Transaction Context
//!
//! Per-attempt metadata built at the start of every `apply()` call.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Actor recorded when the caller does not name one
pub const DEFAULT_ACTOR: &str = "system";

/// Read-only metadata for one transaction attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionContext {
    prev_hash: String,
    tx_id: Uuid,
    timestamp: DateTime<Utc>,
    actor: String,
}

impl TransactionContext {
    /// Fresh context chained to `prev_hash`, with a new v4 id and the current UTC time
    pub fn new(prev_hash: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            prev_hash: prev_hash.into(),
            tx_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor: actor.into(),
        }
    }

    /// Tip hash the transaction was evaluated against
    pub fn prev_hash(&self) -> &str {
        &self.prev_hash
    }

    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }
}
