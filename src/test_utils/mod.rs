//! Shared test doubles for the watch subsystem

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::AccessCache;
use crate::CacheError;
use crate::Identity;
use crate::MemNamespaceStore;
use crate::Namespace;
use crate::ProjectSelector;
use crate::Result;
use crate::UserProjectWatcher;
use crate::WatchConfig;
use crate::WatchScope;

pub(crate) fn string_set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Access cache double: serves a fixed seed listing and records removals
pub(crate) struct FakeAccessCache {
    namespaces: Vec<Namespace>,
    removed: Mutex<Vec<u64>>,
    fail_listing: bool,
}

impl FakeAccessCache {
    pub(crate) fn new() -> Arc<Self> {
        Self::with_namespaces(Vec::new())
    }

    pub(crate) fn with_namespaces(namespaces: Vec<Namespace>) -> Arc<Self> {
        Arc::new(Self {
            namespaces,
            removed: Mutex::new(Vec::new()),
            fail_listing: false,
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            namespaces: Vec::new(),
            removed: Mutex::new(Vec::new()),
            fail_listing: true,
        })
    }

    pub(crate) fn removed(&self) -> Vec<u64> {
        self.removed.lock().clone()
    }
}

impl AccessCache for FakeAccessCache {
    fn list_visible(
        &self,
        identity: &Identity,
        _selector: &ProjectSelector,
    ) -> Result<Vec<Namespace>> {
        if self.fail_listing {
            return Err(CacheError::SeedList {
                principal: identity.name().to_string(),
                reason: "membership review unavailable".to_string(),
            }
            .into());
        }
        Ok(self.namespaces.clone())
    }

    fn remove_watcher(
        &self,
        watcher_id: u64,
    ) {
        self.removed.lock().push(watcher_id);
    }
}

/// Production wiring in miniature: in-memory store, fake access cache, and a
/// wildcard watcher over them. The run loop is not started; tests do that.
pub(crate) struct TestWatcher {
    pub(crate) watcher: Arc<UserProjectWatcher>,
    pub(crate) store: Arc<MemNamespaceStore>,
    pub(crate) access: Arc<FakeAccessCache>,
}

impl TestWatcher {
    pub(crate) fn new(
        principal: &str,
        groups: &[&str],
        selector: ProjectSelector,
        namespaces: &[&str],
    ) -> Self {
        Self::with_config(principal, groups, selector, namespaces, &WatchConfig::default())
    }

    pub(crate) fn with_config(
        principal: &str,
        groups: &[&str],
        selector: ProjectSelector,
        namespaces: &[&str],
        config: &WatchConfig,
    ) -> Self {
        let store = Arc::new(MemNamespaceStore::new());
        for name in namespaces {
            store.upsert(Namespace::new(*name));
        }
        let access = FakeAccessCache::new();

        let watcher = UserProjectWatcher::new(
            1,
            Identity::new(principal, groups.iter().copied()),
            WatchScope::Wildcard,
            selector,
            store.clone(),
            access.clone(),
            false,
            config,
        )
        .expect("watcher construction succeeds");

        Self { watcher, store, access }
    }
}
