//! # Graph Store Errors

use thiserror::Error;

/// Result type for graph store operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Graph store errors
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    #[error("Store rejected write: {0}")]
    WriteRejected(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GraphError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::WriteRejected(_) => "HOOKGATE_STORE_WRITE_REJECTED",
            GraphError::Unavailable(_) => "HOOKGATE_STORE_UNAVAILABLE",
            GraphError::Internal(_) => "HOOKGATE_STORE_INTERNAL",
        }
    }
}
