//! # Hook Errors

use thiserror::Error;

use crate::graph::GraphError;

/// Outcome of a hook handler: `Ok(allow)` or a fault
pub type HookOutcome = Result<bool, HookError>;

/// Faults raised while running a hook handler.
///
/// A fault is distinct from a handler returning `false`: the engine rejects
/// the transaction in both cases but tags the receipt differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("handler failed: {0}")]
    Failed(String),

    #[error("timed out after {0}ms")]
    Timeout(u64),

    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl HookError {
    /// Create a handler failure
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            HookError::Failed(_) => "HOOKGATE_HOOK_FAILED",
            HookError::Timeout(_) => "HOOKGATE_HOOK_TIMEOUT",
            HookError::Panicked(_) => "HOOKGATE_HOOK_PANICKED",
        }
    }
}

/// Store reads inside a handler fail the handler
impl From<GraphError> for HookError {
    fn from(e: GraphError) -> Self {
        Self::Failed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(HookError::Timeout(50).to_string(), "timed out after 50ms");
        assert_eq!(
            HookError::failed("policy server down").to_string(),
            "handler failed: policy server down"
        );
        assert_eq!(HookError::Panicked("boom".into()).code(), "HOOKGATE_HOOK_PANICKED");
    }
}
