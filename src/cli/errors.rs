//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::fmt;
use std::io;

use crate::receipts::ReceiptStoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// I/O error (stdout, archive directory)
    IoError,
    /// Archive directory does not exist
    ArchiveNotFound,
    /// Receipt archive failure
    ArchiveError,
    /// Tip hash has no record
    ReceiptNotFound,
    /// Chain verification failed
    ChainBroken,
    /// Bad command input
    InvalidInput,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::IoError => "HOOKGATE_CLI_IO_ERROR",
            Self::ArchiveNotFound => "HOOKGATE_CLI_ARCHIVE_NOT_FOUND",
            Self::ArchiveError => "HOOKGATE_CLI_ARCHIVE_ERROR",
            Self::ReceiptNotFound => "HOOKGATE_CLI_RECEIPT_NOT_FOUND",
            Self::ChainBroken => "HOOKGATE_CLI_CHAIN_BROKEN",
            Self::InvalidInput => "HOOKGATE_CLI_INVALID_INPUT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn archive_not_found(dir: &std::path::Path) -> Self {
        Self::new(
            CliErrorCode::ArchiveNotFound,
            format!("Receipt archive not found: {}", dir.display()),
        )
    }

    pub fn receipt_not_found(hash: &str) -> Self {
        Self::new(
            CliErrorCode::ReceiptNotFound,
            format!("No receipt stored under {}", hash),
        )
    }

    pub fn chain_broken(hash: &str) -> Self {
        Self::new(
            CliErrorCode::ChainBroken,
            format!("Receipt chain from {} failed verification", hash),
        )
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ReceiptStoreError> for CliError {
    fn from(e: ReceiptStoreError) -> Self {
        Self::new(CliErrorCode::ArchiveError, format!("{} ({})", e, e.code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::chain_broken("abc");
        assert_eq!(err.code(), &CliErrorCode::ChainBroken);
        assert!(err.to_string().starts_with("HOOKGATE_CLI_CHAIN_BROKEN: "));
    }

    #[test]
    fn test_from_archive_error() {
        let err: CliError = ReceiptStoreError::InvalidKey("zz".into()).into();
        assert_eq!(err.code_str(), "HOOKGATE_CLI_ARCHIVE_ERROR");
        assert!(err.message().contains("HOOKGATE_RECEIPT_INVALID_KEY"));
    }
}
