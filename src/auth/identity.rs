use std::collections::HashSet;

/// The authenticated principal a watcher is scoped to.
///
/// Immutable for the watcher's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    groups: HashSet<String>,
}

impl Identity {
    pub fn new<S>(
        name: impl Into<String>,
        groups: impl IntoIterator<Item = S>,
    ) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &HashSet<String> {
        &self.groups
    }

    /// Membership test against a namespace's full current authorized sets:
    /// the principal is named directly, or shares at least one group.
    pub fn has_access(
        &self,
        users: &HashSet<String>,
        groups: &HashSet<String>,
    ) -> bool {
        users.contains(&self.name) || self.groups.iter().any(|group| groups.contains(group))
    }
}
