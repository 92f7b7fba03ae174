//! In-memory receipt backend

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::backend::ReceiptBackend;
use super::errors::{ReceiptStoreError, ReceiptStoreResult};

#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ReceiptStoreError {
    ReceiptStoreError::Internal("Lock poisoned".into())
}

impl ReceiptBackend for MemoryBackend {
    fn put(&self, key: &str, data: &[u8]) -> ReceiptStoreResult<()> {
        let mut blobs = self.blobs.write().map_err(|_| poisoned())?;
        blobs.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> ReceiptStoreResult<Option<Vec<u8>>> {
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        Ok(blobs.get(key).cloned())
    }

    fn contains(&self, key: &str) -> ReceiptStoreResult<bool> {
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        Ok(blobs.contains_key(key))
    }

    fn keys(&self) -> ReceiptStoreResult<Vec<String>> {
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        Ok(blobs.keys().cloned().collect())
    }
}
