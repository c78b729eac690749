use super::*;
use crate::FieldSelector;
use crate::LabelSelector;
use crate::ProjectSelector;

#[test]
fn test_conversion_carries_metadata() {
    let namespace = Namespace::new("ns-01")
        .with_resource_version(7)
        .with_label("stage", "prod")
        .with_annotation(DISPLAY_NAME_ANNOTATION, "Production")
        .with_annotation(DESCRIPTION_ANNOTATION, "shared prod tenant");

    let project = project_from_namespace(&namespace);

    assert_eq!(project.name, "ns-01");
    assert_eq!(project.resource_version, 7);
    assert_eq!(project.labels.get("stage").map(String::as_str), Some("prod"));
    assert_eq!(project.display_name.as_deref(), Some("Production"));
    assert_eq!(project.description.as_deref(), Some("shared prod tenant"));
    assert_eq!(project.phase, NamespacePhase::Active);
}

#[test]
fn test_conversion_without_display_annotations() {
    let project = project_from_namespace(&Namespace::new("ns-02"));

    assert_eq!(project.display_name, None);
    assert_eq!(project.description, None);
}

#[test]
fn test_convert_and_filter_applies_selector() {
    let namespace = Namespace::new("ns-01").with_label("stage", "prod");

    let matching = ProjectSelector::new(
        LabelSelector::matching([("stage", "prod")]),
        FieldSelector::everything(),
    );
    assert!(convert_and_filter(&namespace, &matching).is_some());

    let rejecting = ProjectSelector::new(
        LabelSelector::matching([("stage", "dev")]),
        FieldSelector::everything(),
    );
    assert!(convert_and_filter(&namespace, &rejecting).is_none());
}

#[test]
fn test_terminating_phase_survives_conversion() {
    let namespace = Namespace::new("ns-03").with_phase(NamespacePhase::Terminating);

    let project = project_from_namespace(&namespace);
    assert_eq!(project.phase, NamespacePhase::Terminating);
    assert_eq!(project.phase.as_str(), "Terminating");
}
