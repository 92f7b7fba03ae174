//! Observable events
//!
//! Events are explicit and typed. Each maps to a stable uppercase name.

use std::fmt;

use super::logger::Severity;

/// Observable events in hookgate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Transactions
    /// apply() entered the guarding phase
    TxBegin,
    /// Mutation applied and tip advanced
    TxCommitted,
    /// Transaction rejected; tip and store unchanged
    TxRejected,

    // Hooks
    HookRegistered,
    HookUnregistered,
    /// A handler errored, panicked or timed out
    HookFault,

    // Store
    /// Rolling back partially applied additions failed
    StorageCompensationFailed,

    // Receipt archive
    ReceiptStored,
    /// A record was missing or unreadable
    ReceiptLoadFailed,
    ChainVerified,
    ChainBroken,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TxBegin => "TX_BEGIN",
            Event::TxCommitted => "TX_COMMITTED",
            Event::TxRejected => "TX_REJECTED",
            Event::HookRegistered => "HOOK_REGISTERED",
            Event::HookUnregistered => "HOOK_UNREGISTERED",
            Event::HookFault => "HOOK_FAULT",
            Event::StorageCompensationFailed => "STORAGE_COMPENSATION_FAILED",
            Event::ReceiptStored => "RECEIPT_STORED",
            Event::ReceiptLoadFailed => "RECEIPT_LOAD_FAILED",
            Event::ChainVerified => "CHAIN_VERIFIED",
            Event::ChainBroken => "CHAIN_BROKEN",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::TxBegin => Severity::Trace,
            Event::TxCommitted
            | Event::HookRegistered
            | Event::HookUnregistered
            | Event::ReceiptStored
            | Event::ChainVerified => Severity::Info,
            Event::TxRejected | Event::ReceiptLoadFailed | Event::ChainBroken => Severity::Warn,
            Event::HookFault => Severity::Error,
            Event::StorageCompensationFailed => Severity::Fatal,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::TxCommitted.as_str(), "TX_COMMITTED");
        assert_eq!(Event::HookFault.to_string(), "HOOK_FAULT");
    }

    #[test]
    fn test_compensation_failure_is_fatal() {
        assert_eq!(Event::StorageCompensationFailed.severity(), Severity::Fatal);
        assert!(Event::TxRejected.severity() < Event::HookFault.severity());
    }
}
