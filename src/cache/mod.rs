mod mem_namespace_store;
pub use mem_namespace_store::*;

#[cfg(test)]
use mockall::automock;

use crate::Namespace;

/// Read-only view of the canonical namespace set.
///
/// The watcher performs point lookups at diff time; a lookup miss is not an
/// error, the namespace may have been concurrently deleted.
#[cfg_attr(test, automock)]
pub trait NamespaceStore: Send + Sync + 'static {
    fn get(
        &self,
        name: &str,
    ) -> Option<Namespace>;

    /// Bulk listing, used by cache-level seeding and recovery
    fn list(&self) -> Vec<Namespace>;
}
