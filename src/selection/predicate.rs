//! Selection predicates over converted project objects.
//!
//! A [`ProjectSelector`] combines a label selector and a field selector; a
//! project is selected only when both match. Selectors are stateless and are
//! reused across every diff computation of a watcher's lifetime.

use std::collections::BTreeMap;

use crate::Project;
use crate::Result;
use crate::SelectorError;

/// Field selector key for the project name
pub const FIELD_NAME: &str = "metadata.name";
/// Field selector key for the project phase
pub const FIELD_PHASE: &str = "status.phase";

/// Equality-based label selector.
///
/// Every required `key=value` pair must be present on the object's labels.
/// An empty selector matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    required: BTreeMap<String, String>,
}

impl LabelSelector {
    /// Selector that matches every label set
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn matching<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            required: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn matches(
        &self,
        labels: &BTreeMap<String, String>,
    ) -> bool {
        self.required
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
    }
}

/// Equality-based field selector over the fields a project exposes.
///
/// Supported keys: `metadata.name` and `status.phase`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelector {
    terms: BTreeMap<String, String>,
}

impl FieldSelector {
    /// Selector that matches every project
    pub fn everything() -> Self {
        Self::default()
    }

    /// Parse a comma-separated `key=value` list, e.g. `metadata.name=ns-03`.
    ///
    /// An empty spec yields the match-everything selector.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut terms = BTreeMap::new();
        for term in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let Some((key, value)) = term.split_once('=') else {
                return Err(SelectorError::MalformedTerm { term: term.to_string() }.into());
            };
            let key = key.trim();
            if key != FIELD_NAME && key != FIELD_PHASE {
                return Err(SelectorError::UnsupportedField { key: key.to_string() }.into());
            }
            terms.insert(key.to_string(), value.trim().to_string());
        }
        Ok(Self { terms })
    }

    pub fn matches(
        &self,
        project: &Project,
    ) -> bool {
        self.terms.iter().all(|(key, value)| match key.as_str() {
            FIELD_NAME => project.name == *value,
            FIELD_PHASE => project.phase.as_str() == value,
            _ => false,
        })
    }
}

/// Combined matcher applied to every converted project before it is emitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSelector {
    labels: LabelSelector,
    fields: FieldSelector,
}

impl ProjectSelector {
    /// Selector that matches every project
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn new(
        labels: LabelSelector,
        fields: FieldSelector,
    ) -> Self {
        Self { labels, fields }
    }

    /// Both the label selector and the field selector must match
    pub fn matches(
        &self,
        project: &Project,
    ) -> bool {
        self.labels.matches(&project.labels) && self.fields.matches(project)
    }
}
