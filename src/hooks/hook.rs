//! # Knowledge Hooks
//!
//! A hook is a named handler attached to one phase of a transaction.
//! PRE hooks are guards and may veto; POST hooks are notified after commit.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::HookOutcome;
use crate::delta::QuadDelta;
use crate::engine::TransactionContext;
use crate::graph::GraphView;

/// Priority assigned when none is given
pub const DEFAULT_PRIORITY: i64 = 100;

/// Boxed future returned by hook handlers
pub type HookFuture<'a> = Pin<Box<dyn Future<Output = HookOutcome> + Send + 'a>>;

/// Transaction phase a hook is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HookMode {
    /// Runs before mutation; returning `false` rejects the transaction
    Pre,
    /// Runs after mutation; cannot veto
    Post,
}

impl HookMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookMode::Pre => "PRE",
            HookMode::Post => "POST",
        }
    }
}

impl fmt::Display for HookMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handler capability invoked by the engine.
///
/// Handlers get a read-only view of the store. They may suspend (for
/// example to consult a remote policy service); the engine awaits each
/// handler before starting the next.
pub trait HookHandler: Send + Sync {
    fn evaluate<'a>(
        &'a self,
        store: &'a dyn GraphView,
        delta: &'a QuadDelta,
        ctx: &'a TransactionContext,
    ) -> HookFuture<'a>;
}

/// Synchronous closure adapter, see [`hook_fn`]
pub struct FnHook<F>(F);

impl<F> HookHandler for FnHook<F>
where
    F: Fn(&dyn GraphView, &QuadDelta, &TransactionContext) -> HookOutcome + Send + Sync,
{
    fn evaluate<'a>(
        &'a self,
        store: &'a dyn GraphView,
        delta: &'a QuadDelta,
        ctx: &'a TransactionContext,
    ) -> HookFuture<'a> {
        Box::pin(async move { (self.0)(store, delta, ctx) })
    }
}

/// Wrap a synchronous closure as a hook handler
pub fn hook_fn<F>(f: F) -> Arc<dyn HookHandler>
where
    F: Fn(&dyn GraphView, &QuadDelta, &TransactionContext) -> HookOutcome
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnHook(f))
}

/// Async closure adapter, see [`async_hook_fn`]
pub struct AsyncFnHook<F>(F);

impl<F, Fut> HookHandler for AsyncFnHook<F>
where
    F: Fn(QuadDelta, TransactionContext) -> Fut + Send + Sync,
    Fut: Future<Output = HookOutcome> + Send + 'static,
{
    fn evaluate<'a>(
        &'a self,
        _store: &'a dyn GraphView,
        delta: &'a QuadDelta,
        ctx: &'a TransactionContext,
    ) -> HookFuture<'a> {
        Box::pin((self.0)(delta.clone(), ctx.clone()))
    }
}

/// Wrap an async closure as a hook handler.
///
/// The closure receives owned copies of the delta and context. Handlers
/// that need to query the store should implement [`HookHandler`] directly.
pub fn async_hook_fn<F, Fut>(f: F) -> Arc<dyn HookHandler>
where
    F: Fn(QuadDelta, TransactionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookOutcome> + Send + 'static,
{
    Arc::new(AsyncFnHook(f))
}

/// A named guard or side-effect registered with the engine.
#[derive(Clone)]
pub struct KnowledgeHook {
    id: String,
    mode: HookMode,
    priority: i64,
    enabled: bool,
    handler: Arc<dyn HookHandler>,
}

impl KnowledgeHook {
    /// Create an enabled hook with the default priority
    pub fn new(id: impl Into<String>, mode: HookMode, handler: Arc<dyn HookHandler>) -> Self {
        Self {
            id: id.into(),
            mode,
            priority: DEFAULT_PRIORITY,
            enabled: true,
            handler,
        }
    }

    /// Create a PRE (guard) hook
    pub fn pre(id: impl Into<String>, handler: Arc<dyn HookHandler>) -> Self {
        Self::new(id, HookMode::Pre, handler)
    }

    /// Create a POST (side-effect) hook
    pub fn post(id: impl Into<String>, handler: Arc<dyn HookHandler>) -> Self {
        Self::new(id, HookMode::Post, handler)
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> HookMode {
        self.mode
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn handler(&self) -> &Arc<dyn HookHandler> {
        &self.handler
    }

    /// Canonical `{id}:{mode}:{priority}` string.
    ///
    /// Used only for logic hashing, never for dispatch.
    pub fn signature(&self) -> String {
        format!("{}:{}:{}", self.id, self.mode, self.priority)
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl fmt::Debug for KnowledgeHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnowledgeHook")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Record of one hook invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookResult {
    pub hook_id: String,
    pub mode: HookMode,
    pub success: bool,
    pub duration_ns: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow() -> Arc<dyn HookHandler> {
        hook_fn(|_, _, _| Ok(true))
    }

    #[test]
    fn test_signature_format() {
        let hook = KnowledgeHook::pre("guard", allow()).with_priority(200);
        assert_eq!(hook.signature(), "guard:PRE:200");

        let hook = KnowledgeHook::post("notify", allow());
        assert_eq!(hook.signature(), "notify:POST:100");
    }

    #[test]
    fn test_defaults() {
        let hook = KnowledgeHook::pre("h", allow());
        assert_eq!(hook.priority(), DEFAULT_PRIORITY);
        assert!(hook.is_enabled());
        assert!(!hook.with_enabled(false).is_enabled());
    }

    #[test]
    fn test_mode_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&HookMode::Pre).unwrap(), "\"PRE\"");
        assert_eq!(serde_json::to_string(&HookMode::Post).unwrap(), "\"POST\"");
    }

    #[test]
    fn test_debug_omits_handler() {
        let hook = KnowledgeHook::pre("h", allow());
        let debug = format!("{:?}", hook);
        assert!(debug.contains("\"h\""));
        assert!(debug.contains("Pre"));
    }
}
