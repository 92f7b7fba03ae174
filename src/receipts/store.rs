//! Content-addressed receipt chain

use std::collections::HashSet;

use super::anchor::ChainAnchor;
use super::backend::ReceiptBackend;
use super::errors::{ReceiptStoreError, ReceiptStoreResult};
use super::file::FileBackend;
use super::memory::MemoryBackend;
use super::record::{ArchiveReceipt, StoredReceipt};
use crate::digest::digests_equal;
use crate::observability::{log_event_with_fields, Event};

/// Archive of hook execution receipts linked into a backward chain.
///
/// Every record is stored under the SHA-256 of its content, excluding the
/// anchor. Anchors point at the predecessor's content hash, so a chain can
/// be walked and re-verified from any tip.
#[derive(Debug)]
pub struct ReceiptStore<B: ReceiptBackend> {
    backend: B,
}

impl ReceiptStore<FileBackend> {
    /// Archive backed by one JSON file per record under `dir`
    pub fn open(dir: impl Into<std::path::PathBuf>) -> ReceiptStoreResult<Self> {
        Ok(Self::new(FileBackend::open(dir)?))
    }
}

impl ReceiptStore<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: ReceiptBackend> ReceiptStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Anchor `receipt` after `previous` (or as genesis) and persist it.
    ///
    /// Returns the stored record; its `content_hash` is the key to pass
    /// as `previous` for the next receipt.
    pub fn store_receipt(
        &self,
        receipt: ArchiveReceipt,
        previous: Option<&StoredReceipt>,
    ) -> ReceiptStoreResult<StoredReceipt> {
        let anchor = match previous {
            None => ChainAnchor::genesis(),
            Some(prev) => {
                let prev_anchor = prev
                    .anchor()
                    .ok_or_else(|| ReceiptStoreError::MissingAnchor(prev.content_hash.clone()))?;
                ChainAnchor::following(prev.content_hash.clone(), prev_anchor.chain_height)
            }
        };

        let receipt = receipt.anchored(anchor);
        let content_hash = receipt.content_hash()?;
        let stored = StoredReceipt {
            receipt,
            content_hash,
        };

        let bytes = serde_json::to_vec_pretty(&stored)?;
        self.backend.put(&stored.content_hash, &bytes)?;

        let height = stored.chain_height().unwrap_or(0).to_string();
        log_event_with_fields(
            Event::ReceiptStored,
            &[
                ("content_hash", &stored.content_hash),
                ("chain_height", &height),
                ("hook_id", stored.receipt.hook_id()),
            ],
        );
        Ok(stored)
    }

    /// Load the record stored under `hash`.
    ///
    /// Missing and unreadable records both yield `None`.
    pub fn load_receipt(&self, hash: &str) -> Option<StoredReceipt> {
        let bytes = match self.backend.get(hash) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                log_event_with_fields(
                    Event::ReceiptLoadFailed,
                    &[("content_hash", hash), ("error", &e.to_string())],
                );
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(stored) => Some(stored),
            Err(e) => {
                log_event_with_fields(
                    Event::ReceiptLoadFailed,
                    &[("content_hash", hash), ("error", &e.to_string())],
                );
                None
            }
        }
    }

    /// Walk back from `hash`, most recent first, returning at most `depth`
    /// records. Stops early at genesis or at a missing link.
    pub fn get_receipt_chain(&self, hash: &str, depth: usize) -> Vec<StoredReceipt> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = hash.to_string();

        while chain.len() < depth && visited.insert(current.clone()) {
            let Some(stored) = self.load_receipt(&current) else {
                break;
            };
            let next = match stored.anchor() {
                Some(anchor) if !anchor.is_genesis() => Some(anchor.previous_receipt_hash.clone()),
                _ => None,
            };
            chain.push(stored);
            match next {
                Some(prev) => current = prev,
                None => break,
            }
        }
        chain
    }

    /// True only if every hop from `hash` back to genesis is present, hashes
    /// to its own address, and descends in height by exactly one.
    pub fn verify_chain_integrity(&self, hash: &str) -> bool {
        match self.find_break(hash) {
            None => {
                log_event_with_fields(Event::ChainVerified, &[("tip", hash)]);
                true
            }
            Some((at, reason)) => {
                log_event_with_fields(
                    Event::ChainBroken,
                    &[("tip", hash), ("at", &at), ("reason", reason)],
                );
                false
            }
        }
    }

    /// First broken link on the walk from `hash`, with a reason
    fn find_break(&self, hash: &str) -> Option<(String, &'static str)> {
        let mut visited = HashSet::new();
        let mut current = hash.to_string();
        let mut expected_height: Option<u64> = None;

        loop {
            if !visited.insert(current.clone()) {
                return Some((current, "cycle"));
            }
            let Some(stored) = self.load_receipt(&current) else {
                let reason = match self.backend.contains(&current) {
                    Ok(true) => "corrupt",
                    _ => "missing",
                };
                return Some((current, reason));
            };

            let recomputed = match stored.receipt.content_hash() {
                Ok(h) => h,
                Err(_) => return Some((current, "unhashable")),
            };
            if !digests_equal(&recomputed, &current)
                || !digests_equal(&stored.content_hash, &current)
            {
                return Some((current, "content hash mismatch"));
            }

            let Some(anchor) = stored.anchor() else {
                return Some((current, "no anchor"));
            };
            if let Some(expected) = expected_height {
                if anchor.chain_height != expected {
                    return Some((current, "height mismatch"));
                }
            }
            if anchor.is_genesis() {
                return None;
            }
            if anchor.previous_receipt_hash.is_empty() {
                return Some((current, "missing previous hash"));
            }

            expected_height = Some(anchor.chain_height - 1);
            current = anchor.previous_receipt_hash.clone();
        }
    }

    /// Keys of every stored record, sorted
    pub fn list_hashes(&self) -> ReceiptStoreResult<Vec<String>> {
        self.backend.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build_chain(store: &ReceiptStore<MemoryBackend>, n: usize) -> Vec<StoredReceipt> {
        let mut out: Vec<StoredReceipt> = Vec::new();
        for i in 0..n {
            let receipt = ArchiveReceipt::new(format!("hook-{}", i), i % 2 == 0)
                .with_metadata("seq", json!(i));
            let stored = store.store_receipt(receipt, out.last()).unwrap();
            out.push(stored);
        }
        out
    }

    #[test]
    fn test_genesis_anchor() {
        let store = ReceiptStore::in_memory();
        let stored = store
            .store_receipt(ArchiveReceipt::new("h", true), None)
            .unwrap();
        let anchor = stored.anchor().unwrap();
        assert!(anchor.is_genesis());
        assert!(anchor.previous_receipt_hash.is_empty());
        assert!(store.verify_chain_integrity(&stored.content_hash));
    }

    #[test]
    fn test_heights_and_links() {
        let store = ReceiptStore::in_memory();
        let chain = build_chain(&store, 4);
        for (i, stored) in chain.iter().enumerate() {
            assert_eq!(stored.chain_height(), Some(i as u64));
        }
        assert_eq!(
            chain[3].anchor().unwrap().previous_receipt_hash,
            chain[2].content_hash
        );
    }

    #[test]
    fn test_load_round_trip() {
        let store = ReceiptStore::in_memory();
        let chain = build_chain(&store, 2);
        let loaded = store.load_receipt(&chain[1].content_hash).unwrap();
        assert_eq!(loaded, chain[1]);
        assert!(store.load_receipt(&"f".repeat(64)).is_none());
    }

    #[test]
    fn test_corrupt_record_loads_as_none() {
        let store = ReceiptStore::in_memory();
        let key = "e".repeat(64);
        store.backend().put(&key, b"not json").unwrap();
        assert!(store.load_receipt(&key).is_none());
        assert!(!store.verify_chain_integrity(&key));
    }

    #[test]
    fn test_break_reason_tells_missing_from_corrupt() {
        let store = ReceiptStore::in_memory();
        let chain = build_chain(&store, 2);
        let missing = "0".repeat(64);
        assert_eq!(store.find_break(&missing), Some((missing.clone(), "missing")));
        assert_eq!(store.find_break(&chain[1].content_hash), None);

        let genesis = &chain[0].content_hash;
        store.backend().put(genesis, b"{").unwrap();
        assert_eq!(
            store.find_break(&chain[1].content_hash),
            Some((genesis.clone(), "corrupt"))
        );
    }

    #[test]
    fn test_chain_depth_limits() {
        let store = ReceiptStore::in_memory();
        let chain = build_chain(&store, 5);
        let tip = &chain[4].content_hash;

        let two = store.get_receipt_chain(tip, 2);
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].content_hash, chain[4].content_hash);
        assert_eq!(two[1].content_hash, chain[3].content_hash);

        let all = store.get_receipt_chain(tip, 100);
        assert_eq!(all.len(), 5);
        assert!(all[4].anchor().unwrap().is_genesis());

        assert!(store.get_receipt_chain(tip, 0).is_empty());
    }

    #[test]
    fn test_previous_without_anchor_is_error() {
        let store = ReceiptStore::in_memory();
        let receipt = ArchiveReceipt::new("orphan", true);
        let orphan = StoredReceipt {
            content_hash: receipt.content_hash().unwrap(),
            receipt,
        };
        let err = store
            .store_receipt(ArchiveReceipt::new("next", true), Some(&orphan))
            .unwrap_err();
        assert_eq!(err.code(), "HOOKGATE_RECEIPT_MISSING_ANCHOR");
    }

    #[test]
    fn test_list_hashes() {
        let store = ReceiptStore::in_memory();
        let chain = build_chain(&store, 3);
        let mut expected: Vec<String> = chain.iter().map(|s| s.content_hash.clone()).collect();
        expected.sort();
        assert_eq!(store.list_hashes().unwrap(), expected);
    }
}
