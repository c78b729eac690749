use dashmap::DashMap;

use super::NamespaceStore;
use crate::Namespace;

/// In-memory namespace store keyed by name.
///
/// Backing store for embedded deployments and tests; production deployments
/// wrap their own informer-backed cache behind [`NamespaceStore`].
#[derive(Debug, Default)]
pub struct MemNamespaceStore {
    namespaces: DashMap<String, Namespace>,
}

impl MemNamespaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a namespace under its own name
    pub fn upsert(
        &self,
        namespace: Namespace,
    ) {
        self.namespaces.insert(namespace.name.clone(), namespace);
    }

    pub fn remove(
        &self,
        name: &str,
    ) -> Option<Namespace> {
        self.namespaces.remove(name).map(|(_, namespace)| namespace)
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

impl NamespaceStore for MemNamespaceStore {
    fn get(
        &self,
        name: &str,
    ) -> Option<Namespace> {
        self.namespaces.get(name).map(|entry| entry.value().clone())
    }

    fn list(&self) -> Vec<Namespace> {
        self.namespaces.iter().map(|entry| entry.value().clone()).collect()
    }
}
