use crate::ProjectSelector;

use super::Namespace;
use super::Project;
use super::DESCRIPTION_ANNOTATION;
use super::DISPLAY_NAME_ANNOTATION;

/// Convert a namespace into its project representation.
///
/// Metadata is carried over as-is; the display annotations are additionally
/// surfaced as first-class fields.
pub fn project_from_namespace(namespace: &Namespace) -> Project {
    Project {
        name: namespace.name.clone(),
        resource_version: namespace.resource_version,
        labels: namespace.labels.clone(),
        annotations: namespace.annotations.clone(),
        display_name: namespace.annotations.get(DISPLAY_NAME_ANNOTATION).cloned(),
        description: namespace.annotations.get(DESCRIPTION_ANNOTATION).cloned(),
        phase: namespace.phase,
    }
}

/// Convert a namespace and apply the selection predicate.
///
/// Shared by the diff engine, seeding, and the bootstrap path so filtering
/// semantics are identical regardless of trigger. Returns `None` when the
/// converted project fails the selector; rejection is silent.
pub(crate) fn convert_and_filter(
    namespace: &Namespace,
    selector: &ProjectSelector,
) -> Option<Project> {
    let project = project_from_namespace(namespace);
    if selector.matches(&project) {
        Some(project)
    } else {
        None
    }
}
