//! # In-Memory Graph

use std::collections::BTreeSet;
use std::sync::RwLock;

use super::errors::{GraphError, GraphResult};
use super::{GraphStore, GraphView, TriplePattern};
use crate::delta::Triple;

/// Set-semantics triple store held in memory.
///
/// Adding a triple that is already present is a no-op, as is removing one
/// that is absent. Query results come back in triple order.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    triples: RwLock<BTreeSet<Triple>>,
}

impl MemoryGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph pre-populated with triples
    pub fn with_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        Self {
            triples: RwLock::new(triples.into_iter().collect()),
        }
    }

    /// Snapshot of every triple, in order
    pub fn snapshot(&self) -> GraphResult<Vec<Triple>> {
        let triples = self
            .triples
            .read()
            .map_err(|_| GraphError::Internal("Lock poisoned".into()))?;
        Ok(triples.iter().cloned().collect())
    }
}

impl GraphView for MemoryGraph {
    fn count(&self) -> GraphResult<usize> {
        self.triples
            .read()
            .map(|t| t.len())
            .map_err(|_| GraphError::Internal("Lock poisoned".into()))
    }

    fn query(&self, pattern: &TriplePattern) -> GraphResult<Vec<Triple>> {
        let triples = self
            .triples
            .read()
            .map_err(|_| GraphError::Internal("Lock poisoned".into()))?;
        Ok(triples
            .iter()
            .filter(|t| pattern.matches(t))
            .cloned()
            .collect())
    }

    fn contains(&self, triple: &Triple) -> GraphResult<bool> {
        self.triples
            .read()
            .map(|t| t.contains(triple))
            .map_err(|_| GraphError::Internal("Lock poisoned".into()))
    }
}

impl GraphStore for MemoryGraph {
    fn add(&self, triples: &[Triple]) -> GraphResult<()> {
        let mut set = self
            .triples
            .write()
            .map_err(|_| GraphError::Internal("Lock poisoned".into()))?;
        set.extend(triples.iter().cloned());
        Ok(())
    }

    fn remove(&self, triples: &[Triple]) -> GraphResult<()> {
        let mut set = self
            .triples
            .write()
            .map_err(|_| GraphError::Internal("Lock poisoned".into()))?;
        for triple in triples {
            set.remove(triple);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(s, p, o)
    }

    #[test]
    fn test_add_is_idempotent() {
        let graph = MemoryGraph::new();
        graph.add(&[t("s", "p", "o"), t("s", "p", "o")]).unwrap();
        assert_eq!(graph.count().unwrap(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let graph = MemoryGraph::with_triples(vec![t("s", "p", "o")]);
        graph.remove(&[t("x", "y", "z")]).unwrap();
        assert_eq!(graph.count().unwrap(), 1);
    }

    #[test]
    fn test_query_by_pattern() {
        let graph = MemoryGraph::with_triples(vec![
            t("urn:alice", "urn:knows", "urn:bob"),
            t("urn:alice", "urn:age", "30"),
            t("urn:bob", "urn:knows", "urn:carol"),
        ]);

        let knows = graph
            .query(&TriplePattern::any().with_predicate("urn:knows"))
            .unwrap();
        assert_eq!(knows.len(), 2);

        let alice = graph
            .query(&TriplePattern::any().with_subject("urn:alice"))
            .unwrap();
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[0].predicate, "urn:age");

        assert_eq!(graph.query(&TriplePattern::any()).unwrap().len(), 3);
    }

    #[test]
    fn test_contains() {
        let graph = MemoryGraph::with_triples(vec![t("s", "p", "o")]);
        assert!(graph.contains(&t("s", "p", "o")).unwrap());
        assert!(!graph.contains(&t("s", "p", "x")).unwrap());
    }
}
