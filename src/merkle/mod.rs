//! Merkle trees
//!
//! Batch leaf hashing with per-leaf inclusion proofs. A proof is the list
//! of sibling hashes from leaf to root, each tagged with the side it sits
//! on, and verifies against a root without the other leaves.

mod tree;

pub use tree::{MerkleProof, MerkleTree, ProofStep};
