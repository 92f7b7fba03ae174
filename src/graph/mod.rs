//! Graph store contract
//!
//! The engine consumes a triple store through two traits:
//!
//! - `GraphView`: read access (count, pattern query). This is all a hook
//!   ever sees, so hooks cannot write the store directly.
//! - `GraphStore`: adds batch `add`/`remove`. Only the engine calls these.
//!
//! Each `add` or `remove` call must be atomic for its batch. The engine
//! handles atomicity across the two calls of one transaction.

mod errors;
mod memory;

pub use errors::{GraphError, GraphResult};
pub use memory::MemoryGraph;

use crate::delta::Triple;

/// Read-only access to a triple store
pub trait GraphView: Send + Sync {
    /// Number of triples held
    fn count(&self) -> GraphResult<usize>;

    /// Triples matching a pattern
    fn query(&self, pattern: &TriplePattern) -> GraphResult<Vec<Triple>>;

    /// Whether an exact triple is present
    fn contains(&self, triple: &Triple) -> GraphResult<bool> {
        let pattern = TriplePattern::exact(triple);
        Ok(!self.query(&pattern)?.is_empty())
    }
}

/// Mutable triple store
pub trait GraphStore: GraphView {
    /// Add a batch of triples
    fn add(&self, triples: &[Triple]) -> GraphResult<()>;

    /// Remove a batch of triples
    fn remove(&self, triples: &[Triple]) -> GraphResult<()>;
}

/// Triple pattern; `None` positions match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<String>,
}

impl TriplePattern {
    /// Pattern matching every triple
    pub fn any() -> Self {
        Self::default()
    }

    /// Pattern matching exactly one triple
    pub fn exact(triple: &Triple) -> Self {
        Self {
            subject: Some(triple.subject.clone()),
            predicate: Some(triple.predicate.clone()),
            object: Some(triple.object.clone()),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Check a triple against the pattern
    pub fn matches(&self, triple: &Triple) -> bool {
        fn term_matches(bound: &Option<String>, term: &str) -> bool {
            bound.as_deref().map_or(true, |b| b == term)
        }
        term_matches(&self.subject, &triple.subject)
            && term_matches(&self.predicate, &triple.predicate)
            && term_matches(&self.object, &triple.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matching() {
        let triple = Triple::new("urn:s", "urn:p", "urn:o");
        assert!(TriplePattern::any().matches(&triple));
        assert!(TriplePattern::exact(&triple).matches(&triple));
        assert!(TriplePattern::any().with_object("urn:o").matches(&triple));
        assert!(!TriplePattern::any().with_subject("urn:x").matches(&triple));
    }
}
