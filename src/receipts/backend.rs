//! Pluggable byte storage for the receipt archive

use super::errors::ReceiptStoreResult;

/// Content-addressed blob storage keyed by hex digest
pub trait ReceiptBackend: Send + Sync + std::fmt::Debug {
    /// Write `data` under `key`, replacing any previous value
    fn put(&self, key: &str, data: &[u8]) -> ReceiptStoreResult<()>;

    /// Read the bytes under `key`; `Ok(None)` when absent
    fn get(&self, key: &str) -> ReceiptStoreResult<Option<Vec<u8>>>;

    fn contains(&self, key: &str) -> ReceiptStoreResult<bool>;

    /// All stored keys, sorted
    fn keys(&self) -> ReceiptStoreResult<Vec<String>>;
}
