//! Chain anchors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position of a stored receipt in the archive chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAnchor {
    /// Content hash of the predecessor; empty for genesis
    pub previous_receipt_hash: String,
    pub chain_height: u64,
    pub timestamp: DateTime<Utc>,
}

impl ChainAnchor {
    /// First anchor of a chain
    pub fn genesis() -> Self {
        Self {
            previous_receipt_hash: String::new(),
            chain_height: 0,
            timestamp: Utc::now(),
        }
    }

    /// Anchor following a predecessor at `previous_height`
    pub fn following(previous_hash: impl Into<String>, previous_height: u64) -> Self {
        Self {
            previous_receipt_hash: previous_hash.into(),
            chain_height: previous_height + 1,
            timestamp: Utc::now(),
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.chain_height == 0
    }
}
