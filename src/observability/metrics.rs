//! Engine metrics
//!
//! - Counters only
//! - Monotonic increase
//! - Relaxed atomics; exact totals, no cross-counter consistency

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Transaction and hook counters for one engine
#[derive(Debug, Default)]
pub struct EngineMetrics {
    committed: AtomicU64,
    guard_rejections: AtomicU64,
    fault_rejections: AtomicU64,
    storage_rejections: AtomicU64,
    hook_invocations: AtomicU64,
    hook_faults: AtomicU64,
}

/// Point-in-time copy of `EngineMetrics`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub committed: u64,
    pub guard_rejections: u64,
    pub fault_rejections: u64,
    pub storage_rejections: u64,
    pub hook_invocations: u64,
    pub hook_faults: u64,
}

impl MetricsSnapshot {
    /// Every rejected transaction, regardless of cause
    pub fn rejected(&self) -> u64 {
        self.guard_rejections + self.fault_rejections + self.storage_rejections
    }
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_committed(&self) {
        self.committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_guard_rejections(&self) {
        self.guard_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_fault_rejections(&self) {
        self.fault_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_storage_rejections(&self) {
        self.storage_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_hook_invocations(&self) {
        self.hook_invocations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_hook_faults(&self) {
        self.hook_faults.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            committed: self.committed.load(Ordering::Relaxed),
            guard_rejections: self.guard_rejections.load(Ordering::Relaxed),
            fault_rejections: self.fault_rejections.load(Ordering::Relaxed),
            storage_rejections: self.storage_rejections.load(Ordering::Relaxed),
            hook_invocations: self.hook_invocations.load(Ordering::Relaxed),
            hook_faults: self.hook_faults.load(Ordering::Relaxed),
        }
    }
}
