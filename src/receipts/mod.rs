//! Receipt archive for hookgate
//!
//! Stores hook execution receipts by content hash and links them into a
//! backward chain through anchors.
//!
//! # Invariants
//!
//! 1. A record's key is the SHA-256 of its content, anchor excluded
//! 2. Heights start at 0 and increase by exactly one per link
//! 3. Reads never fail: missing or corrupt records load as `None`
//! 4. Only a chain that reaches genesis intact verifies
//!
//! The archive is independent of the engine's tip chain.

mod anchor;
mod backend;
mod errors;
mod file;
mod memory;
mod record;
mod store;

pub use anchor::ChainAnchor;
pub use backend::ReceiptBackend;
pub use errors::{ReceiptStoreError, ReceiptStoreResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use record::{ArchiveReceipt, StoredReceipt};
pub use store::ReceiptStore;
