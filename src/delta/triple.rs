//! Triple value type

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single (subject, predicate, object) statement.
///
/// Ordering is lexicographic over the three terms, which gives stores and
/// canonical encoding a total, deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    /// Create a new triple
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Append the length-prefixed canonical form of this triple.
    ///
    /// Each term is written as an 8-byte big-endian length followed by its
    /// UTF-8 bytes, so no choice of term contents can collide with another
    /// split of the same bytes.
    pub fn write_canonical(&self, out: &mut Vec<u8>) {
        for term in [&self.subject, &self.predicate, &self.object] {
            out.extend_from_slice(&(term.len() as u64).to_be_bytes());
            out.extend_from_slice(term.as_bytes());
        }
    }
}

impl<S, P, O> From<(S, P, O)> for Triple
where
    S: Into<String>,
    P: Into<String>,
    O: Into<String>,
{
    fn from((s, p, o): (S, P, O)) -> Self {
        Triple::new(s, p, o)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> <{}>", self.subject, self.predicate, self.object)
    }
}
