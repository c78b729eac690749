use std::collections::HashSet;

/// Namespace universe a watcher may consider.
///
/// A closed variant rather than a sentinel name, so the visibility predicate
/// stays total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchScope {
    /// Visibility computed purely from membership
    Wildcard,

    /// Only the listed namespaces are ever considered, still gated by
    /// membership and the selection predicate
    Named(HashSet<String>),
}

impl WatchScope {
    pub fn named<S>(names: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        WatchScope::Named(names.into_iter().map(Into::into).collect())
    }

    pub fn allows(
        &self,
        namespace: &str,
    ) -> bool {
        match self {
            WatchScope::Wildcard => true,
            WatchScope::Named(names) => names.contains(namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_allows_everything() {
        assert!(WatchScope::Wildcard.allows("ns-01"));
        assert!(WatchScope::Wildcard.allows(""));
    }

    #[test]
    fn test_named_scope_allows_only_members() {
        let scope = WatchScope::named(["ns-01", "ns-02"]);

        assert!(scope.allows("ns-01"));
        assert!(scope.allows("ns-02"));
        assert!(!scope.allows("ns-03"));
    }

    #[test]
    fn test_empty_named_scope_allows_nothing() {
        let scope = WatchScope::named(Vec::<String>::new());

        assert!(!scope.allows("ns-01"));
    }
}
