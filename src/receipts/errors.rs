//! # Receipt Archive Errors
//!
//! Only writes surface errors to the caller. Reads degrade: a missing or
//! corrupt record loads as `None` and breaks chain verification.

use thiserror::Error;

/// Result type for receipt archive operations
pub type ReceiptStoreResult<T> = Result<T, ReceiptStoreError>;

/// Receipt archive errors
#[derive(Debug, Error)]
pub enum ReceiptStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Previous receipt has no chain anchor: {0}")]
    MissingAnchor(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReceiptStoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ReceiptStoreError::Io(_) => "HOOKGATE_RECEIPT_IO",
            ReceiptStoreError::Serialization(_) => "HOOKGATE_RECEIPT_SERIALIZATION",
            ReceiptStoreError::InvalidKey(_) => "HOOKGATE_RECEIPT_INVALID_KEY",
            ReceiptStoreError::MissingAnchor(_) => "HOOKGATE_RECEIPT_MISSING_ANCHOR",
            ReceiptStoreError::Internal(_) => "HOOKGATE_RECEIPT_INTERNAL",
        }
    }
}
