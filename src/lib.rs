//! hookgate - deterministic hook-gated transactions over a triple store
//!
//! A transaction is a bounded `QuadDelta`. PRE hooks may veto it, the store
//! applies it, POST hooks observe it, and the engine chains a Merkle root
//! onto the previous tip. Every attempt yields a `Receipt`.
//!
//! Receipts can be archived in a content-addressed `ReceiptStore` whose
//! anchors form an independently verifiable chain.

pub mod cli;
pub mod delta;
pub mod digest;
pub mod engine;
pub mod graph;
pub mod hooks;
pub mod merkle;
pub mod observability;
pub mod receipts;

pub use delta::{QuadDelta, Triple, ValidationError, CHATMAN_CONSTANT};
pub use engine::{Engine, EngineConfig, Receipt, Rejection, TransactionContext, GENESIS_HASH};
pub use graph::{GraphStore, GraphView, MemoryGraph};
pub use hooks::{HookMode, HookResult, KnowledgeHook};
pub use merkle::{MerkleProof, MerkleTree};
pub use receipts::{ArchiveReceipt, ChainAnchor, ReceiptStore};
