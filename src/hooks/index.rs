//! # Hook Index
//!
//! Ordered registry of hooks. Execution order is priority descending, ties
//! broken by id ascending. The logic hash depends only on the set of
//! (id, mode, priority) triples, never on registration order.

use std::cmp::Ordering;

use super::hook::{HookMode, KnowledgeHook};
use crate::digest::sha256_hex;

/// Hooks sorted in execution order
#[derive(Debug, Default, Clone)]
pub struct HookIndex {
    hooks: Vec<KnowledgeHook>,
}

fn execution_order(a: &KnowledgeHook, b: &KnowledgeHook) -> Ordering {
    b.priority()
        .cmp(&a.priority())
        .then_with(|| a.id().cmp(b.id()))
}

impl HookIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a hook at its ordered position.
    ///
    /// A hook already registered under the same id is replaced and returned.
    pub fn register(&mut self, hook: KnowledgeHook) -> Option<KnowledgeHook> {
        let replaced = self.take(hook.id());
        let position = self
            .hooks
            .binary_search_by(|existing| execution_order(existing, &hook))
            .unwrap_or_else(|insert_at| insert_at);
        self.hooks.insert(position, hook);
        replaced
    }

    /// Remove a hook by id. Returns whether anything was removed.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.take(id).is_some()
    }

    fn take(&mut self, id: &str) -> Option<KnowledgeHook> {
        let position = self.hooks.iter().position(|h| h.id() == id)?;
        Some(self.hooks.remove(position))
    }

    /// Enable or disable a registered hook. Returns false if the id is unknown.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.hooks.iter_mut().find(|h| h.id() == id) {
            Some(hook) => {
                hook.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&KnowledgeHook> {
        self.hooks.iter().find(|h| h.id() == id)
    }

    /// All hooks in execution order
    pub fn iter(&self) -> impl Iterator<Item = &KnowledgeHook> {
        self.hooks.iter()
    }

    /// Enabled hooks of one mode, in execution order
    pub fn active(&self, mode: HookMode) -> impl Iterator<Item = &KnowledgeHook> {
        self.hooks
            .iter()
            .filter(move |h| h.mode() == mode && h.is_enabled())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// SHA-256 over the sorted signatures of every registered hook, each
    /// written as `u64be(len) ‖ bytes`.
    ///
    /// Disabled hooks are included: they remain part of the policy set.
    pub fn logic_hash(&self) -> String {
        let mut signatures: Vec<String> = self.hooks.iter().map(|h| h.signature()).collect();
        signatures.sort();

        let mut input = Vec::new();
        for signature in &signatures {
            input.extend_from_slice(&(signature.len() as u64).to_be_bytes());
            input.extend_from_slice(signature.as_bytes());
        }
        sha256_hex(&input)
    }
}
