use pretty_assertions::assert_eq;
use rel_ir::{Accessibility, ClassModel, HookRole, MemberCandidate};

use super::*;

#[test]
fn accepts_ordinary_identifiers() {
    assert_eq!(check_identifier("stream"), Ok(()));
    assert_eq!(check_identifier("_buffer2"), Ok(()));
    assert_eq!(check_identifier("Größe"), Ok(()));
    assert_eq!(check_identifier("async"), Ok(()));
}

#[test]
fn keywords_need_escaping() {
    assert!(check_identifier("class").is_err());
    assert_eq!(check_identifier("@class"), Ok(()));
}

#[test]
fn rejects_malformed_identifiers() {
    assert_eq!(
        check_identifier("9lives"),
        Err("identifiers cannot start with a digit")
    );
    assert_eq!(check_identifier(""), Err("identifiers cannot be empty"));
    assert_eq!(check_identifier("@"), Err("identifiers cannot be empty"));
    assert!(check_identifier("a-b").is_err());
    assert!(check_identifier("$x").is_err());
}

#[test]
fn validate_model_reports_every_bad_name() {
    let model = ClassModel::new("Widget")
        .in_namespace("App.9Bad")
        .sync_release()
        .member(MemberCandidate::field("ok").releasable())
        .member(MemberCandidate::field("bad name").releasable())
        .hook("int", HookRole::SyncHook);

    let problems = validate_model(&model);
    let names: Vec<_> = problems
        .iter()
        .filter_map(|p| match p {
            CodegenProblem::MalformedIdentifier { name, role, .. } => Some((*role, name.as_str())),
            _ => None,
        })
        .collect();

    assert_eq!(
        names,
        vec![
            (IdentifierRole::NamespaceSegment, "9Bad"),
            (IdentifierRole::Member, "bad name"),
            (IdentifierRole::Hook, "int"),
        ]
    );
}

#[test]
fn validate_model_reports_unnamed_members() {
    let model = ClassModel::new("Widget")
        .sync_release()
        .member(MemberCandidate::field("a"))
        .member(MemberCandidate::field_group(Vec::<String>::new()));

    assert_eq!(
        validate_model(&model),
        vec![CodegenProblem::UnnamedMember {
            class: "Widget".to_string(),
            index: 1,
        }]
    );
}

#[test]
fn validate_model_rejects_nested_only_accessibility() {
    let nested = ClassModel::new("Inner")
        .in_namespace("App")
        .with_accessibility(Accessibility::Private)
        .sync_release();
    assert_eq!(
        validate_model(&nested),
        vec![CodegenProblem::NestedAccessibility {
            class: "App.Inner".to_string(),
            accessibility: Accessibility::Private,
        }]
    );

    let internal = nested.with_accessibility(Accessibility::Internal);
    assert_eq!(validate_model(&internal), Vec::new());
}

#[test]
fn clean_model_has_no_problems() {
    let model = ClassModel::new("Widget")
        .in_namespace("App.Net")
        .sync_release()
        .member(MemberCandidate::field_group(["a", "b"]).releasable())
        .hook("Cleanup", HookRole::FinalizeHook);

    assert!(validate_model(&model).is_empty());
}
