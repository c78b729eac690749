use super::*;
use crate::Error;
use crate::Namespace;
use crate::NamespacePhase;
use crate::SelectorError;

fn project(name: &str) -> crate::Project {
    crate::project_from_namespace(&Namespace::new(name))
}

#[test]
fn test_everything_matches_any_project() {
    let selector = ProjectSelector::everything();

    assert!(selector.matches(&project("ns-01")));
    assert!(selector.matches(&project("ns-02")));
}

#[test]
fn test_label_selector_requires_all_pairs() {
    let selector = LabelSelector::matching([("stage", "prod"), ("team", "core")]);

    let full = Namespace::new("ns-01")
        .with_label("stage", "prod")
        .with_label("team", "core")
        .with_label("extra", "ignored");
    assert!(selector.matches(&full.labels));

    let partial = Namespace::new("ns-02").with_label("stage", "prod");
    assert!(!selector.matches(&partial.labels));

    let mismatched = Namespace::new("ns-03")
        .with_label("stage", "dev")
        .with_label("team", "core");
    assert!(!selector.matches(&mismatched.labels));
}

#[test]
fn test_field_selector_by_name() {
    let selector = FieldSelector::parse("metadata.name=ns-03").expect("valid selector");

    assert!(selector.matches(&project("ns-03")));
    assert!(!selector.matches(&project("ns-01")));
}

#[test]
fn test_field_selector_by_phase() {
    let selector = FieldSelector::parse("status.phase=Terminating").expect("valid selector");

    let terminating = crate::project_from_namespace(
        &Namespace::new("ns-01").with_phase(NamespacePhase::Terminating),
    );
    assert!(selector.matches(&terminating));
    assert!(!selector.matches(&project("ns-02")));
}

#[test]
fn test_field_selector_parse_empty_is_everything() {
    let selector = FieldSelector::parse("").expect("empty spec is valid");
    assert_eq!(selector, FieldSelector::everything());
}

#[test]
fn test_field_selector_rejects_unknown_key() {
    let err = FieldSelector::parse("spec.finalizers=none").unwrap_err();
    assert!(matches!(
        err,
        Error::Selector(SelectorError::UnsupportedField { .. })
    ));
}

#[test]
fn test_field_selector_rejects_malformed_term() {
    let err = FieldSelector::parse("metadata.name").unwrap_err();
    assert!(matches!(
        err,
        Error::Selector(SelectorError::MalformedTerm { .. })
    ));
}

#[test]
fn test_combined_selector_is_a_conjunction() {
    let selector = ProjectSelector::new(
        LabelSelector::matching([("stage", "prod")]),
        FieldSelector::parse("metadata.name=ns-01").expect("valid selector"),
    );

    let both = crate::project_from_namespace(&Namespace::new("ns-01").with_label("stage", "prod"));
    assert!(selector.matches(&both));

    let wrong_name =
        crate::project_from_namespace(&Namespace::new("ns-02").with_label("stage", "prod"));
    assert!(!selector.matches(&wrong_name));

    let wrong_label = project("ns-01");
    assert!(!selector.matches(&wrong_label));
}
