use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Annotation carrying the human-facing project name
pub const DISPLAY_NAME_ANNOTATION: &str = "project/display-name";
/// Annotation carrying the project description
pub const DESCRIPTION_ANNOTATION: &str = "project/description";

/// Lifecycle phase of a namespace, mirrored onto the converted project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamespacePhase {
    Active,
    Terminating,
}

impl NamespacePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamespacePhase::Active => "Active",
            NamespacePhase::Terminating => "Terminating",
        }
    }
}

/// The canonical multi-tenant resource unit, as held by the namespace store.
///
/// `resource_version` increases monotonically on every mutation; the watcher
/// uses it to suppress redundant `Modified` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub resource_version: u64,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub phase: NamespacePhase,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_version: 1,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            phase: NamespacePhase::Active,
        }
    }

    pub fn with_resource_version(
        mut self,
        resource_version: u64,
    ) -> Self {
        self.resource_version = resource_version;
        self
    }

    pub fn with_label(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_annotation(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn with_phase(
        mut self,
        phase: NamespacePhase,
    ) -> Self {
        self.phase = phase;
        self
    }
}

/// Per-principal surface of a namespace: what watch consumers actually see.
///
/// Carries the namespace metadata plus the display annotations lifted into
/// first-class fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub resource_version: u64,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub phase: NamespacePhase,
}
