//! Bounded changesets
//!
//! A `QuadDelta` is the unit of work handed to the engine: an immutable pair
//! of addition and removal lists.
//!
//! # Invariants Enforced
//!
//! - Each list holds at most `CHATMAN_CONSTANT` triples (checked separately)
//! - The bound is inclusive: exactly 64 is accepted
//! - Immutable after construction

mod errors;
mod triple;

pub use errors::{DeltaResult, DeltaSide, ValidationError};
pub use triple::Triple;

use serde::Serialize;

/// Maximum number of triples permitted in either list of a delta.
pub const CHATMAN_CONSTANT: usize = 64;

/// Immutable, size-bounded changeset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QuadDelta {
    additions: Vec<Triple>,
    removals: Vec<Triple>,
}

impl QuadDelta {
    /// Build a delta, validating both lists against `CHATMAN_CONSTANT`.
    pub fn new<A, R>(additions: A, removals: R) -> DeltaResult<Self>
    where
        A: IntoIterator,
        A::Item: Into<Triple>,
        R: IntoIterator,
        R::Item: Into<Triple>,
    {
        let additions: Vec<Triple> = additions.into_iter().map(Into::into).collect();
        let removals: Vec<Triple> = removals.into_iter().map(Into::into).collect();

        check_bound(DeltaSide::Additions, additions.len())?;
        check_bound(DeltaSide::Removals, removals.len())?;

        Ok(Self {
            additions,
            removals,
        })
    }

    /// Delta that only adds triples
    pub fn additions<A>(additions: A) -> DeltaResult<Self>
    where
        A: IntoIterator,
        A::Item: Into<Triple>,
    {
        Self::new(additions, Vec::<Triple>::new())
    }

    /// Delta that only removes triples
    pub fn removals<R>(removals: R) -> DeltaResult<Self>
    where
        R: IntoIterator,
        R::Item: Into<Triple>,
    {
        Self::new(Vec::<Triple>::new(), removals)
    }

    /// The empty delta. Always valid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Triples to add, in caller order
    pub fn added(&self) -> &[Triple] {
        &self.additions
    }

    /// Triples to remove, in caller order
    pub fn removed(&self) -> &[Triple] {
        &self.removals
    }

    /// Total number of operations in the delta
    pub fn len(&self) -> usize {
        self.additions.len() + self.removals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }
}

fn check_bound(side: DeltaSide, count: usize) -> DeltaResult<()> {
    if count > CHATMAN_CONSTANT {
        return Err(ValidationError::TopologyViolation {
            side,
            count,
            limit: CHATMAN_CONSTANT,
        });
    }
    Ok(())
}
