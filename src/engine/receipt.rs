//! Transaction receipts

use serde::Serialize;
use uuid::Uuid;

use crate::hooks::HookResult;

/// Immutable outcome of one `apply()` call.
///
/// Committed receipts carry the new tip as `merkle_root`. Rejected receipts
/// carry the unchanged tip they were evaluated against, plus an error tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    tx_id: Uuid,
    committed: bool,
    merkle_root: String,
    logic_hash: String,
    hook_results: Vec<HookResult>,
    duration_ns: u64,
    error: Option<String>,
}

impl Receipt {
    pub(crate) fn committed(
        tx_id: Uuid,
        merkle_root: String,
        logic_hash: String,
        hook_results: Vec<HookResult>,
        duration_ns: u64,
    ) -> Self {
        Self {
            tx_id,
            committed: true,
            merkle_root,
            logic_hash,
            hook_results,
            duration_ns,
            error: None,
        }
    }

    pub(crate) fn rejected(
        tx_id: Uuid,
        merkle_root: String,
        logic_hash: String,
        hook_results: Vec<HookResult>,
        duration_ns: u64,
        error: String,
    ) -> Self {
        Self {
            tx_id,
            committed: false,
            merkle_root,
            logic_hash,
            hook_results,
            duration_ns,
            error: Some(error),
        }
    }

    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn merkle_root(&self) -> &str {
        &self.merkle_root
    }

    /// Hash of the hook set active for this transaction
    pub fn logic_hash(&self) -> &str {
        &self.logic_hash
    }

    /// One entry per hook invoked, in execution order
    pub fn hook_results(&self) -> &[HookResult] {
        &self.hook_results
    }

    pub fn duration_ns(&self) -> u64 {
        self.duration_ns
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Serialize to a JSON line
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GENESIS_HASH;
    use crate::hooks::HookMode;

    #[test]
    fn test_rejected_receipt() {
        let receipt = Receipt::rejected(
            Uuid::new_v4(),
            GENESIS_HASH.to_string(),
            "ab".repeat(32),
            vec![HookResult {
                hook_id: "deny".into(),
                mode: HookMode::Pre,
                success: false,
                duration_ns: 10,
            }],
            42,
            "Guard Violation: deny".into(),
        );
        assert!(!receipt.is_committed());
        assert_eq!(receipt.error(), Some("Guard Violation: deny"));
        assert_eq!(receipt.hook_results().len(), 1);
    }

    #[test]
    fn test_json_shape() {
        let receipt = Receipt::committed(
            Uuid::new_v4(),
            "cd".repeat(32),
            "ab".repeat(32),
            Vec::new(),
            7,
        );
        let value: serde_json::Value = serde_json::from_str(&receipt.to_json().unwrap()).unwrap();
        assert_eq!(value["committed"], true);
        assert!(value["error"].is_null());
        assert_eq!(value["duration_ns"], 7);
        assert_eq!(value["tx_id"], receipt.tx_id().to_string());
    }
}
