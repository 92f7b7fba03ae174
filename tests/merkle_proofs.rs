//! Merkle Proof Tests
//!
//! Inclusion proofs verify against the root and nothing else:
//! - Every leaf of trees of assorted sizes verifies
//! - Any corruption of item, proof or root fails verification

use hookgate::merkle::{MerkleTree, ProofStep};

fn tree_of(n: usize) -> (MerkleTree, Vec<String>) {
    let items: Vec<String> = (0..n).map(|i| format!("receipt-{:03}", i)).collect();
    let mut tree = MerkleTree::new();
    tree.add_batch(&items);
    (tree, items)
}

// =============================================================================
// Valid Proofs
// =============================================================================

/// Every leaf verifies for balanced and unbalanced trees.
#[test]
fn test_all_leaves_verify_across_sizes() {
    for n in [1, 2, 3, 4, 5, 7, 8, 13, 16, 33] {
        let (tree, items) = tree_of(n);
        let root = tree.get_root().unwrap().to_string();
        for item in &items {
            let proof = tree.get_proof(item).unwrap();
            assert!(
                MerkleTree::verify_proof(item, &proof, &root),
                "size {} item {}",
                n,
                item
            );
        }
    }
}

/// Proof length is the tree height.
#[test]
fn test_proof_length_is_height() {
    let (tree, items) = tree_of(8);
    assert_eq!(tree.get_proof(&items[0]).unwrap().len(), 3);

    let (tree, items) = tree_of(9);
    assert_eq!(tree.get_proof(&items[8]).unwrap().len(), 4);
}

/// Adding a leaf changes the root and invalidates old proofs.
#[test]
fn test_growth_invalidates_old_root() {
    let (mut tree, items) = tree_of(4);
    let old_root = tree.get_root().unwrap().to_string();
    let old_proof = tree.get_proof(&items[1]).unwrap();

    tree.add("receipt-new");
    let new_root = tree.get_root().unwrap().to_string();

    assert_ne!(old_root, new_root);
    assert!(MerkleTree::verify_proof(&items[1], &old_proof, &old_root));
    assert!(!MerkleTree::verify_proof(&items[1], &old_proof, &new_root));
}

// =============================================================================
// Corruption
// =============================================================================

/// A different item does not verify with another item's proof.
#[test]
fn test_wrong_item_fails() {
    let (tree, items) = tree_of(6);
    let root = tree.get_root().unwrap();
    let proof = tree.get_proof(&items[2]).unwrap();
    assert!(!MerkleTree::verify_proof(&items[3], &proof, root));
    assert!(!MerkleTree::verify_proof("not-in-tree", &proof, root));
}

/// Flipping a side flag or altering a sibling hash fails.
#[test]
fn test_corrupted_proof_fails() {
    let (tree, items) = tree_of(8);
    let root = tree.get_root().unwrap();
    let proof = tree.get_proof(&items[4]).unwrap();

    for i in 0..proof.len() {
        let mut flipped = proof.clone();
        flipped[i].is_left = !flipped[i].is_left;
        assert!(!MerkleTree::verify_proof(&items[4], &flipped, root), "flip {}", i);

        let mut altered = proof.clone();
        altered[i].sibling_hash = MerkleTree::leaf_hash("forged");
        assert!(!MerkleTree::verify_proof(&items[4], &altered, root), "alter {}", i);
    }
}

/// Truncated or extended proofs fail.
#[test]
fn test_wrong_length_proof_fails() {
    let (tree, items) = tree_of(8);
    let root = tree.get_root().unwrap();
    let proof = tree.get_proof(&items[0]).unwrap();

    assert!(!MerkleTree::verify_proof(&items[0], &proof[..proof.len() - 1], root));

    let mut extended = proof.clone();
    extended.push(ProofStep {
        sibling_hash: MerkleTree::leaf_hash("extra"),
        is_left: false,
    });
    assert!(!MerkleTree::verify_proof(&items[0], &extended, root));
}

/// A wrong or malformed root fails.
#[test]
fn test_wrong_root_fails() {
    let (tree, items) = tree_of(5);
    let proof = tree.get_proof(&items[0]).unwrap();

    let (other, _) = tree_of(6);
    assert!(!MerkleTree::verify_proof(&items[0], &proof, other.get_root().unwrap()));
    assert!(!MerkleTree::verify_proof(&items[0], &proof, ""));
    assert!(!MerkleTree::verify_proof(&items[0], &proof, "zz"));
}
