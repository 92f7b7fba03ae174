//! Chain Determinism Tests
//!
//! The tip chain is a pure function of prior tip and delta:
//! - Delta bounds are enforced at construction
//! - Fresh engines replaying the same deltas agree on every root
//! - The tip changes if and only if a transaction commits
//! - The logic hash depends on the hook set, not registration order

use hookgate::delta::{DeltaSide, QuadDelta, Triple, ValidationError, CHATMAN_CONSTANT};
use hookgate::engine::{compute_merkle_root, Engine, GENESIS_HASH};
use hookgate::hooks::{hook_fn, KnowledgeHook};

fn triples(n: usize, prefix: &str) -> Vec<Triple> {
    (0..n)
        .map(|i| Triple::new(format!("urn:{}:{}", prefix, i), "urn:p", "urn:o"))
        .collect()
}

fn script() -> Vec<QuadDelta> {
    vec![
        QuadDelta::additions(triples(3, "a")).unwrap(),
        QuadDelta::new(triples(2, "b"), triples(1, "a")).unwrap(),
        QuadDelta::empty(),
        QuadDelta::removals(triples(2, "b")).unwrap(),
    ]
}

// =============================================================================
// Delta Bounds
// =============================================================================

/// Exactly CHATMAN_CONSTANT triples per side is accepted.
#[test]
fn test_bound_is_inclusive() {
    let delta = QuadDelta::new(
        triples(CHATMAN_CONSTANT, "a"),
        triples(CHATMAN_CONSTANT, "r"),
    )
    .unwrap();
    assert_eq!(delta.added().len(), 64);
    assert_eq!(delta.removed().len(), 64);
}

/// One over the bound on either side is a topology violation.
#[test]
fn test_over_bound_rejected_per_side() {
    let err = QuadDelta::additions(triples(CHATMAN_CONSTANT + 1, "a")).unwrap_err();
    assert_eq!(
        err,
        ValidationError::TopologyViolation {
            side: DeltaSide::Additions,
            count: 65,
            limit: 64,
        }
    );
    assert!(err.to_string().starts_with("Topology Violation"));

    let err = QuadDelta::removals(triples(CHATMAN_CONSTANT + 1, "r")).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TopologyViolation {
            side: DeltaSide::Removals,
            ..
        }
    ));
}

/// The empty delta is valid and commits.
#[tokio::test]
async fn test_empty_delta_commits() {
    let engine = Engine::in_memory();
    let receipt = engine.apply(&QuadDelta::empty()).await;

    assert!(receipt.is_committed());
    assert_ne!(engine.tip_hash(), GENESIS_HASH);
    assert!(engine.is_empty().unwrap());
}

// =============================================================================
// Determinism
// =============================================================================

/// Two fresh engines replaying the same deltas produce identical roots.
#[tokio::test]
async fn test_fresh_engines_agree() {
    let left = Engine::in_memory();
    let right = Engine::in_memory();

    for delta in script() {
        let a = left.apply(&delta).await;
        let b = right.apply(&delta).await;
        assert!(a.is_committed() && b.is_committed());
        assert_eq!(a.merkle_root(), b.merkle_root());
        assert_ne!(a.tx_id(), b.tx_id());
    }
    assert_eq!(left.tip_hash(), right.tip_hash());
}

/// Each root chains off the previous tip.
#[tokio::test]
async fn test_root_chains_previous_tip() {
    let engine = Engine::in_memory();
    let mut expected_tip = GENESIS_HASH.to_string();

    for delta in script() {
        let expected = compute_merkle_root(&expected_tip, &delta);
        let receipt = engine.apply(&delta).await;
        assert_eq!(receipt.merkle_root(), expected);
        expected_tip = expected;
    }
    assert_eq!(engine.tip_hash(), expected_tip);
}

/// Triple order inside a delta does not affect the root.
#[test]
fn test_root_ignores_triple_order() {
    let forward = QuadDelta::additions(triples(5, "x")).unwrap();
    let mut reversed_triples = triples(5, "x");
    reversed_triples.reverse();
    let reversed = QuadDelta::additions(reversed_triples).unwrap();

    assert_eq!(
        compute_merkle_root(GENESIS_HASH, &forward),
        compute_merkle_root(GENESIS_HASH, &reversed)
    );
}

/// Moving a triple from additions to removals changes the root.
#[test]
fn test_root_distinguishes_sides() {
    let add = QuadDelta::additions(triples(1, "x")).unwrap();
    let remove = QuadDelta::removals(triples(1, "x")).unwrap();
    assert_ne!(
        compute_merkle_root(GENESIS_HASH, &add),
        compute_merkle_root(GENESIS_HASH, &remove)
    );
}

// =============================================================================
// Tip Changes Iff Commit
// =============================================================================

/// Rejected transactions leave the tip where it was.
#[tokio::test]
async fn test_tip_changes_iff_commit() {
    let engine = Engine::in_memory();
    engine.register_hook(KnowledgeHook::pre(
        "even-only",
        hook_fn(|_, delta, _| Ok(delta.added().len() % 2 == 0)),
    ));

    for n in 0..6 {
        let before = engine.tip_hash();
        let receipt = engine
            .apply(&QuadDelta::additions(triples(n, &format!("t{}", n))).unwrap())
            .await;
        let after = engine.tip_hash();

        assert_eq!(receipt.is_committed(), n % 2 == 0);
        if receipt.is_committed() {
            assert_ne!(before, after);
            assert_eq!(after, receipt.merkle_root());
        } else {
            assert_eq!(before, after);
            assert_eq!(receipt.merkle_root(), before);
        }
    }

    let metrics = engine.metrics().snapshot();
    assert_eq!(metrics.committed, 3);
    assert_eq!(metrics.rejected(), 3);
}

// =============================================================================
// Logic Hash
// =============================================================================

/// Registration order does not change the logic hash.
#[test]
fn test_logic_hash_ignores_registration_order() {
    let allow = || hook_fn(|_, _, _| Ok(true));

    let first = Engine::in_memory();
    first.register_hook(KnowledgeHook::pre("a", allow()).with_priority(5));
    first.register_hook(KnowledgeHook::post("b", allow()));

    let second = Engine::in_memory();
    second.register_hook(KnowledgeHook::post("b", allow()));
    second.register_hook(KnowledgeHook::pre("a", allow()).with_priority(5));

    assert_eq!(first.compute_logic_hash(), second.compute_logic_hash());
}

/// Changing a hook's priority or mode changes the logic hash.
#[test]
fn test_logic_hash_tracks_signatures() {
    let allow = || hook_fn(|_, _, _| Ok(true));
    let engine = Engine::in_memory();
    let empty = engine.compute_logic_hash();

    engine.register_hook(KnowledgeHook::pre("a", allow()));
    let pre = engine.compute_logic_hash();
    assert_ne!(pre, empty);

    engine.register_hook(KnowledgeHook::pre("a", allow()).with_priority(7));
    let reprioritized = engine.compute_logic_hash();
    assert_ne!(reprioritized, pre);

    engine.register_hook(KnowledgeHook::post("a", allow()).with_priority(7));
    assert_ne!(engine.compute_logic_hash(), reprioritized);
}

/// Rejected receipts still report the logic hash they were judged under.
#[tokio::test]
async fn test_rejected_receipt_carries_logic_hash() {
    let engine = Engine::in_memory();
    engine.register_hook(KnowledgeHook::pre("deny", hook_fn(|_, _, _| Ok(false))));

    let receipt = engine.apply(&QuadDelta::empty()).await;
    assert!(!receipt.is_committed());
    assert_eq!(receipt.logic_hash(), engine.compute_logic_hash());
}
