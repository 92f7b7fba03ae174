//! Transaction engine subsystem
//!
//! The engine applies bounded deltas to a graph store behind PRE guards,
//! notifies POST hooks, and maintains a lockchain: a rolling tip hash that
//! advances to each committed transaction's merkle root.
//!
//! # Design Principles
//!
//! - Single writer: `apply()` calls are serialized per engine
//! - Every attempt yields a `Receipt`; rejections are data, not errors
//! - Merkle roots are reproducible: no clock, no random ids in the input
//! - The store is injected; the engine never owns a global

mod config;
mod context;
mod engine;
mod hashing;
mod receipt;
mod rejection;

pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use context::{TransactionContext, DEFAULT_ACTOR};
pub use engine::Engine;
pub use hashing::{compute_merkle_root, GENESIS_HASH};
pub use receipt::Receipt;
pub use rejection::Rejection;
