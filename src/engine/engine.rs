//! Transaction engine
//!
//! `apply()` moves through a fixed sequence of states:
//!
//! ```text
//! Building -> Guarding -> Mutating -> Notifying -> Finalizing -> Committed
//!                 |           |
//!                 +-----------+-------------------------------> Rejected
//! ```
//!
//! # Invariants Enforced
//!
//! - At most one `apply()` is in flight per engine (async write gate)
//! - Hooks of one call run sequentially in index order
//! - The first failing guard halts the pipeline before mutation
//! - A rejected transaction leaves the store and tip unchanged
//! - The tip advances only on commit, to the receipt's merkle root
//! - Store mutation and tip advance happen with no await between them;
//!   cancelling `apply()` during Notifying keeps both
//! - Hook misbehaviour (error, panic, timeout) never escapes `apply()`

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use tokio::sync::Mutex;

use super::config::EngineConfig;
use super::context::TransactionContext;
use super::hashing::{compute_merkle_root, GENESIS_HASH};
use super::receipt::Receipt;
use super::rejection::Rejection;
use crate::delta::{QuadDelta, Triple};
use crate::graph::{GraphResult, GraphStore, GraphView, MemoryGraph, TriplePattern};
use crate::hooks::{HookError, HookIndex, HookMode, HookOutcome, HookResult, KnowledgeHook};
use crate::observability::{log_event_with_fields, EngineMetrics, Event};

/// Hook-gated transaction engine over a graph store
pub struct Engine<S: GraphStore> {
    store: Arc<S>,
    hooks: RwLock<HookIndex>,
    tip_hash: RwLock<String>,
    /// Held for the whole of `apply()`; serializes writers
    write_gate: Mutex<()>,
    config: EngineConfig,
    metrics: EngineMetrics,
}

impl Engine<MemoryGraph> {
    /// Engine over a fresh in-memory graph
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryGraph::new()))
    }
}

impl<S: GraphStore + 'static> Engine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: EngineConfig) -> Self {
        Self {
            store,
            hooks: RwLock::new(HookIndex::new()),
            tip_hash: RwLock::new(GENESIS_HASH.to_string()),
            write_gate: Mutex::new(()),
            config,
            metrics: EngineMetrics::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Hook registry
    // ---------------------------------------------------------------------

    /// Register a hook. A hook already registered under the same id is
    /// replaced and returned.
    pub fn register_hook(&self, hook: KnowledgeHook) -> Option<KnowledgeHook> {
        let id = hook.id().to_string();
        let mode = hook.mode();
        let priority = hook.priority().to_string();

        let replaced = self.hooks_mut().register(hook);

        log_event_with_fields(
            Event::HookRegistered,
            &[
                ("hook_id", &id),
                ("mode", mode.as_str()),
                ("priority", &priority),
                ("replaced", if replaced.is_some() { "true" } else { "false" }),
            ],
        );
        replaced
    }

    /// Remove a hook by id. Returns whether a hook was removed.
    pub fn unregister_hook(&self, id: &str) -> bool {
        let removed = self.hooks_mut().unregister(id);
        if removed {
            log_event_with_fields(Event::HookUnregistered, &[("hook_id", id)]);
        }
        removed
    }

    /// Enable or disable a registered hook. Returns false for unknown ids.
    pub fn set_hook_enabled(&self, id: &str, enabled: bool) -> bool {
        self.hooks_mut().set_enabled(id, enabled)
    }

    /// Snapshot of registered hooks in execution order
    pub fn hooks(&self) -> Vec<KnowledgeHook> {
        self.hooks_read().iter().cloned().collect()
    }

    /// Hash of the registered hook set
    pub fn compute_logic_hash(&self) -> String {
        self.hooks_read().logic_hash()
    }

    // ---------------------------------------------------------------------
    // Chain and store state
    // ---------------------------------------------------------------------

    /// Current tip of the lockchain
    pub fn tip_hash(&self) -> String {
        self.tip_hash
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of triples in the store
    pub fn len(&self) -> GraphResult<usize> {
        self.store.count()
    }

    pub fn is_empty(&self) -> GraphResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Query the store. Concurrent with `apply()` only as far as the store
    /// itself isolates readers.
    pub fn query(&self, pattern: &TriplePattern) -> GraphResult<Vec<Triple>> {
        self.store.query(pattern)
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    // ---------------------------------------------------------------------
    // Transactions
    // ---------------------------------------------------------------------

    /// Apply a delta as the configured default actor
    pub async fn apply(&self, delta: &QuadDelta) -> Receipt {
        let actor = self.config.default_actor.clone();
        self.apply_as(delta, actor).await
    }

    /// Apply a delta on behalf of `actor`.
    ///
    /// Always returns a receipt. Guard vetoes, hook faults and store
    /// failures are reported through `Receipt::error`.
    pub async fn apply_as(&self, delta: &QuadDelta, actor: impl Into<String>) -> Receipt {
        let started = Instant::now();
        let _gate = self.write_gate.lock().await;

        // Building
        let ctx = TransactionContext::new(self.tip_hash(), actor);
        let (guards, notifiers, logic_hash) = {
            let index = self.hooks_read();
            (
                index.active(HookMode::Pre).cloned().collect::<Vec<_>>(),
                index.active(HookMode::Post).cloned().collect::<Vec<_>>(),
                index.logic_hash(),
            )
        };

        let tx_id = ctx.tx_id().to_string();
        log_event_with_fields(
            Event::TxBegin,
            &[
                ("tx_id", &tx_id),
                ("actor", ctx.actor()),
                ("additions", &delta.added().len().to_string()),
                ("removals", &delta.removed().len().to_string()),
            ],
        );

        let mut hook_results = Vec::with_capacity(guards.len() + notifiers.len());

        // Guarding, then Mutating
        let outcome = match self.run_guards(&guards, delta, &ctx, &mut hook_results).await {
            Ok(()) => self.mutate(delta),
            Err(rejection) => Err(rejection),
        };

        if let Err(rejection) = outcome {
            self.record_rejection(&rejection);
            let error = rejection.to_string();
            log_event_with_fields(
                Event::TxRejected,
                &[("tx_id", &tx_id), ("code", rejection.code()), ("error", &error)],
            );
            return Receipt::rejected(
                ctx.tx_id(),
                ctx.prev_hash().to_string(),
                logic_hash,
                hook_results,
                elapsed_ns(started),
                error,
            );
        }

        // Tip advances with the store, before the next await point
        let merkle_root = compute_merkle_root(ctx.prev_hash(), delta);
        *self.tip_mut() = merkle_root.clone();
        self.metrics.increment_committed();

        log_event_with_fields(
            Event::TxCommitted,
            &[("tx_id", &tx_id), ("merkle_root", &merkle_root)],
        );

        // Notifying
        self.run_notifiers(&notifiers, delta, &ctx, &mut hook_results)
            .await;

        // Finalizing

        Receipt::committed(
            ctx.tx_id(),
            merkle_root,
            logic_hash,
            hook_results,
            elapsed_ns(started),
        )
    }

    async fn run_guards(
        &self,
        guards: &[KnowledgeHook],
        delta: &QuadDelta,
        ctx: &TransactionContext,
        results: &mut Vec<HookResult>,
    ) -> Result<(), Rejection> {
        for hook in guards {
            let (result, outcome) = self.invoke(hook, delta, ctx).await;
            results.push(result);
            match outcome {
                Ok(true) => {}
                Ok(false) => {
                    return Err(Rejection::GuardViolation {
                        hook_id: hook.id().to_string(),
                    })
                }
                Err(source) => {
                    return Err(Rejection::HookFault {
                        hook_id: hook.id().to_string(),
                        source,
                    })
                }
            }
        }
        Ok(())
    }

    /// POST hooks cannot veto; their outcomes are recorded only.
    async fn run_notifiers(
        &self,
        notifiers: &[KnowledgeHook],
        delta: &QuadDelta,
        ctx: &TransactionContext,
        results: &mut Vec<HookResult>,
    ) {
        for hook in notifiers {
            let (result, _) = self.invoke(hook, delta, ctx).await;
            results.push(result);
        }
    }

    async fn invoke(
        &self,
        hook: &KnowledgeHook,
        delta: &QuadDelta,
        ctx: &TransactionContext,
    ) -> (HookResult, HookOutcome) {
        let started = Instant::now();
        let view: &dyn GraphView = &*self.store;
        let handler = hook.handler();

        // evaluate() runs inside the async block so a panic while building
        // the future is caught along with one raised while polling it
        let guarded = AssertUnwindSafe(async move { handler.evaluate(view, delta, ctx).await })
            .catch_unwind();

        let caught = match self.config.hook_timeout() {
            Some(limit) => match tokio::time::timeout(limit, guarded).await {
                Ok(caught) => caught,
                Err(_) => Ok(Err(HookError::Timeout(duration_ms(limit)))),
            },
            None => guarded.await,
        };
        let outcome: HookOutcome = caught
            .unwrap_or_else(|payload| Err(HookError::Panicked(panic_message(payload.as_ref()))));

        self.metrics.increment_hook_invocations();
        if let Err(err) = &outcome {
            self.metrics.increment_hook_faults();
            let reason = err.to_string();
            log_event_with_fields(
                Event::HookFault,
                &[
                    ("hook_id", hook.id()),
                    ("mode", hook.mode().as_str()),
                    ("code", err.code()),
                    ("reason", &reason),
                ],
            );
        }

        let result = HookResult {
            hook_id: hook.id().to_string(),
            mode: hook.mode(),
            success: matches!(outcome, Ok(true)),
            duration_ns: elapsed_ns(started),
        };
        (result, outcome)
    }

    /// Additions then removals, as one logical unit.
    ///
    /// Each store call is atomic for its batch. If removals fail after
    /// additions succeeded, the additions that were not already present are
    /// taken back out.
    fn mutate(&self, delta: &QuadDelta) -> Result<(), Rejection> {
        let store = &*self.store;

        let mut fresh = Vec::new();
        for triple in delta.added() {
            if !store.contains(triple)? {
                fresh.push(triple.clone());
            }
        }

        store.add(delta.added())?;

        if let Err(err) = store.remove(delta.removed()) {
            if let Err(undo) = store.remove(&fresh) {
                let reason = undo.to_string();
                let count = fresh.len().to_string();
                log_event_with_fields(
                    Event::StorageCompensationFailed,
                    &[("reason", &reason), ("triples", &count)],
                );
            }
            return Err(Rejection::StorageFault(err));
        }
        Ok(())
    }

    fn record_rejection(&self, rejection: &Rejection) {
        match rejection {
            Rejection::GuardViolation { .. } => self.metrics.increment_guard_rejections(),
            Rejection::HookFault { .. } => self.metrics.increment_fault_rejections(),
            Rejection::StorageFault(_) => self.metrics.increment_storage_rejections(),
        }
    }

    fn hooks_read(&self) -> RwLockReadGuard<'_, HookIndex> {
        self.hooks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn hooks_mut(&self) -> RwLockWriteGuard<'_, HookIndex> {
        self.hooks.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn tip_mut(&self) -> RwLockWriteGuard<'_, String> {
        self.tip_hash.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn elapsed_ns(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
