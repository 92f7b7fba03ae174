//! Archive receipt records
//!
//! An `ArchiveReceipt` is a generic hook execution record, independent of
//! engine transactions. Its content hash covers every field except the
//! chain anchor, which itself refers to content hashes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::anchor::ChainAnchor;
use crate::digest::sha256_hex;

/// Hook execution record held in the archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveReceipt {
    execution_id: Uuid,
    hook_id: String,
    condition_result: bool,
    #[serde(default)]
    effect_result: Option<Value>,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
    #[serde(default)]
    chain_anchor: Option<ChainAnchor>,
}

/// Hashed view: everything but the anchor
#[derive(Serialize)]
struct ContentView<'a> {
    execution_id: &'a Uuid,
    hook_id: &'a str,
    condition_result: bool,
    effect_result: &'a Option<Value>,
    timestamp: &'a DateTime<Utc>,
    metadata: &'a BTreeMap<String, Value>,
}

impl ArchiveReceipt {
    pub fn new(hook_id: impl Into<String>, condition_result: bool) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            hook_id: hook_id.into(),
            condition_result,
            effect_result: None,
            timestamp: Utc::now(),
            metadata: BTreeMap::new(),
            chain_anchor: None,
        }
    }

    pub fn with_execution_id(mut self, execution_id: Uuid) -> Self {
        self.execution_id = execution_id;
        self
    }

    pub fn with_effect(mut self, effect: Value) -> Self {
        self.effect_result = Some(effect);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub(crate) fn anchored(mut self, anchor: ChainAnchor) -> Self {
        self.chain_anchor = Some(anchor);
        self
    }

    pub fn execution_id(&self) -> Uuid {
        self.execution_id
    }

    pub fn hook_id(&self) -> &str {
        &self.hook_id
    }

    pub fn condition_result(&self) -> bool {
        self.condition_result
    }

    pub fn effect_result(&self) -> Option<&Value> {
        self.effect_result.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    pub fn chain_anchor(&self) -> Option<&ChainAnchor> {
        self.chain_anchor.as_ref()
    }

    /// SHA-256 over the JSON of every field except the anchor
    pub fn content_hash(&self) -> serde_json::Result<String> {
        let view = ContentView {
            execution_id: &self.execution_id,
            hook_id: &self.hook_id,
            condition_result: self.condition_result,
            effect_result: &self.effect_result,
            timestamp: &self.timestamp,
            metadata: &self.metadata,
        };
        Ok(sha256_hex(&serde_json::to_vec(&view)?))
    }
}

/// On-disk envelope: `{"receipt": {...}, "content_hash": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReceipt {
    pub receipt: ArchiveReceipt,
    pub content_hash: String,
}

impl StoredReceipt {
    pub fn anchor(&self) -> Option<&ChainAnchor> {
        self.receipt.chain_anchor()
    }

    pub fn chain_height(&self) -> Option<u64> {
        self.anchor().map(|a| a.chain_height)
    }
}
