//! Non-owning registry of watcher handles held by the membership cache.
//!
//! The cache may invoke a registered watcher but does not own its lifecycle:
//! watchers are added and removed explicitly, and a watcher must never assume
//! the registry keeps it alive. Fan-out is sequential and each watcher call is
//! bounded by its own enqueue grace window, so a notification pass over the
//! registry is bounded regardless of consumer speed.

use std::collections::HashSet;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use super::CacheWatcher;

/// Watcher handles keyed by id (lock-free concurrent HashMap)
pub struct WatcherRegistry {
    watchers: DashMap<u64, Arc<dyn CacheWatcher>>,

    /// Next watcher ID (monotonically increasing)
    next_id: AtomicU64,
}

impl Default for WatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WatcherRegistry {
    pub fn new() -> Self {
        Self {
            watchers: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Allocate an id for a watcher about to be constructed
    pub fn next_watcher_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Register a watcher handle under its own id.
    /// A later registration under the same id replaces the earlier one.
    pub fn register(
        &self,
        watcher: Arc<dyn CacheWatcher>,
    ) {
        let watcher_id = watcher.watcher_id();
        self.watchers.insert(watcher_id, watcher);
        trace!(watcher_id, "watcher registered");
    }

    /// Remove a watcher handle. Idempotent; returns whether it was present.
    pub fn remove(
        &self,
        watcher_id: u64,
    ) -> bool {
        let removed = self.watchers.remove(&watcher_id).is_some();
        if removed {
            trace!(watcher_id, "watcher removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.watchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }

    /// Fan a membership change out to every registered watcher.
    ///
    /// The handle snapshot is taken before the first await: a watcher that
    /// removes itself mid-notification must not deadlock against the shard it
    /// still appears in.
    pub async fn notify(
        &self,
        namespace: &str,
        users: &HashSet<String>,
        groups: &HashSet<String>,
    ) {
        let targets: Vec<Arc<dyn CacheWatcher>> =
            self.watchers.iter().map(|entry| Arc::clone(entry.value())).collect();

        for watcher in targets {
            watcher.membership_changed(namespace, users, groups).await;
        }

        trace!(
            namespace,
            users = users.len(),
            groups = groups.len(),
            watchers = self.watchers.len(),
            "membership change dispatched"
        );
    }
}
