//! Merkle tree with inclusion proofs

use serde::{Deserialize, Serialize};

use crate::digest::{digests_equal, sha256_hex, sha256_hex_parts};

/// One step of an inclusion proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling_hash: String,
    /// Sibling sits to the left of the running hash
    pub is_left: bool,
}

/// Ordered path from a leaf to the root
pub type MerkleProof = Vec<ProofStep>;

/// Append-only Merkle tree over hex SHA-256 leaves.
///
/// Interior nodes hash the concatenated hex of their children. A level of
/// odd length pairs its last node with itself.
#[derive(Debug, Clone, Default)]
pub struct MerkleTree {
    /// `levels[0]` holds the leaves, the last level holds the root
    levels: Vec<Vec<String>>,
}

impl MerkleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash of an item as a leaf
    pub fn leaf_hash(item: impl AsRef<[u8]>) -> String {
        sha256_hex(item.as_ref())
    }

    fn combine(left: &str, right: &str) -> String {
        sha256_hex_parts(&[left.as_bytes(), right.as_bytes()])
    }

    /// Add one item and recompute the root
    pub fn add(&mut self, item: impl AsRef<[u8]>) {
        self.push_leaf(Self::leaf_hash(item));
        self.rebuild();
    }

    /// Add many items, recomputing the root once
    pub fn add_batch<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for item in items {
            self.push_leaf(Self::leaf_hash(item));
        }
        self.rebuild();
    }

    fn push_leaf(&mut self, leaf: String) {
        if self.levels.is_empty() {
            self.levels.push(Vec::new());
        }
        self.levels[0].push(leaf);
    }

    fn rebuild(&mut self) {
        self.levels.truncate(1);
        loop {
            let current = match self.levels.last() {
                Some(level) if level.len() > 1 => level,
                _ => break,
            };
            let next: Vec<String> = current
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    let right = pair.get(1).unwrap_or(left);
                    Self::combine(left, right)
                })
                .collect();
            self.levels.push(next);
        }
    }

    /// Current root, or `None` for an empty tree
    pub fn get_root(&self) -> Option<&str> {
        self.levels
            .last()
            .and_then(|level| level.first())
            .map(String::as_str)
    }

    /// Inclusion proof for the first leaf matching `item`
    pub fn get_proof(&self, item: impl AsRef<[u8]>) -> Option<MerkleProof> {
        let target = Self::leaf_hash(item);
        let leaves = self.levels.first()?;
        let mut index = leaves.iter().position(|leaf| *leaf == target)?;

        let mut proof = Vec::with_capacity(self.levels.len().saturating_sub(1));
        for level in &self.levels[..self.levels.len() - 1] {
            let is_left = index % 2 == 1;
            let sibling_index = if is_left { index - 1 } else { index + 1 };
            // Odd tail: the node was paired with itself
            let sibling = level.get(sibling_index).unwrap_or(&level[index]);
            proof.push(ProofStep {
                sibling_hash: sibling.clone(),
                is_left,
            });
            index /= 2;
        }
        Some(proof)
    }

    /// Fold `proof` over the leaf hash of `item` and compare with `root`
    pub fn verify_proof(item: impl AsRef<[u8]>, proof: &[ProofStep], root: &str) -> bool {
        let candidate = proof
            .iter()
            .fold(Self::leaf_hash(item), |current, step| {
                if step.is_left {
                    Self::combine(&step.sibling_hash, &current)
                } else {
                    Self::combine(&current, &step.sibling_hash)
                }
            });
        digests_equal(&candidate, root)
    }

    /// Leaf hashes in insertion order
    pub fn leaves(&self) -> &[String] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }
}
