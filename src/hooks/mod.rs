//! Knowledge hooks
//!
//! Hooks are the policy surface of the engine:
//!
//! - PRE hooks (guards) run before mutation and may veto the transaction
//! - POST hooks (side effects) run after mutation and cannot veto
//!
//! Hooks are held in a `HookIndex` ordered by priority (descending) then id
//! (ascending). Identity is by id.

mod errors;
mod hook;
mod index;

pub use errors::{HookError, HookOutcome};
pub use hook::{
    async_hook_fn, hook_fn, AsyncFnHook, FnHook, HookFuture, HookHandler, HookMode, HookResult,
    KnowledgeHook, DEFAULT_PRIORITY,
};
pub use index::HookIndex;
