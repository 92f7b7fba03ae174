//! Delta validation errors
//!
//! Error codes:
//! - HOOKGATE_TOPOLOGY_VIOLATION (ERROR severity)
//!
//! Validation errors are raised at construction time and never reach
//! `Engine::apply`.

use thiserror::Error;

/// Result type for delta construction
pub type DeltaResult<T> = Result<T, ValidationError>;

/// Which side of a delta violated its bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaSide {
    Additions,
    Removals,
}

impl DeltaSide {
    /// Returns the side name
    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaSide::Additions => "additions",
            DeltaSide::Removals => "removals",
        }
    }
}

impl std::fmt::Display for DeltaSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Delta validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One side of the delta holds more triples than the batch bound allows.
    #[error("Topology Violation: {side} has {count} triples, limit is {limit}")]
    TopologyViolation {
        side: DeltaSide,
        count: usize,
        limit: usize,
    },
}

impl ValidationError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::TopologyViolation { .. } => "HOOKGATE_TOPOLOGY_VIOLATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_violation_display() {
        let err = ValidationError::TopologyViolation {
            side: DeltaSide::Removals,
            count: 65,
            limit: 64,
        };
        let display = err.to_string();
        assert!(display.starts_with("Topology Violation"));
        assert!(display.contains("removals"));
        assert!(display.contains("65"));
        assert_eq!(err.code(), "HOOKGATE_TOPOLOGY_VIOLATION");
    }
}
