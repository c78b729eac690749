mod identity;
mod registry;

pub use identity::*;
pub use registry::*;


use std::collections::HashSet;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::Namespace;
use crate::ProjectSelector;
use crate::Result;

/// Interface the authorization membership cache uses to drive a registered
/// watcher. Implementations must never block the caller beyond the bounded
/// enqueue grace window: the cache fans a notification out to every
/// registered watcher synchronously.
#[async_trait]
pub trait CacheWatcher: Send + Sync + 'static {
    /// Identifier the watcher was registered under
    fn watcher_id(&self) -> u64;

    /// A namespace's authorized principal set changed. `users` and `groups`
    /// carry the full current membership for that namespace, never a delta.
    async fn membership_changed(
        &self,
        namespace: &str,
        users: &HashSet<String>,
        groups: &HashSet<String>,
    );
}

/// Read side of the authorization membership cache, as consumed by a watcher.
#[cfg_attr(test, automock)]
pub trait AccessCache: Send + Sync + 'static {
    /// Snapshot of the namespaces currently visible to `identity`.
    /// Used once, at watcher construction, to seed the known visible set.
    fn list_visible(
        &self,
        identity: &Identity,
        selector: &ProjectSelector,
    ) -> Result<Vec<Namespace>>;

    /// Drop a previously registered watcher. Must be idempotent; the watcher
    /// calls this at most once over its lifetime.
    fn remove_watcher(
        &self,
        watcher_id: u64,
    );
}
