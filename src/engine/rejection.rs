//! Transaction rejection causes
//!
//! Rejections are normal control flow, not errors returned to the caller:
//! each one ends up as the `error` tag of a `committed = false` receipt.
//!
//! | Cause          | Receipt tag                          |
//! |----------------|--------------------------------------|
//! | Guard veto     | `Guard Violation: <hook_id>`         |
//! | Handler fault  | `Hook Fault: <hook_id> (<reason>)`   |
//! | Store failure  | `Storage Fault: <reason>`            |

use thiserror::Error;

use crate::graph::GraphError;
use crate::hooks::HookError;

/// Why a transaction did not commit
#[derive(Debug, Clone, Error)]
pub enum Rejection {
    /// A PRE hook returned `false`
    #[error("Guard Violation: {hook_id}")]
    GuardViolation { hook_id: String },

    /// A PRE hook errored, panicked or timed out
    #[error("Hook Fault: {hook_id} ({source})")]
    HookFault { hook_id: String, source: HookError },

    /// The store refused the mutation
    #[error("Storage Fault: {0}")]
    StorageFault(#[from] GraphError),
}

impl Rejection {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::GuardViolation { .. } => "HOOKGATE_GUARD_VIOLATION",
            Rejection::HookFault { .. } => "HOOKGATE_HOOK_FAULT",
            Rejection::StorageFault(_) => "HOOKGATE_STORAGE_FAULT",
        }
    }

    /// Hook responsible for the rejection, if any
    pub fn hook_id(&self) -> Option<&str> {
        match self {
            Rejection::GuardViolation { hook_id } | Rejection::HookFault { hook_id, .. } => {
                Some(hook_id)
            }
            Rejection::StorageFault(_) => None,
        }
    }
}
