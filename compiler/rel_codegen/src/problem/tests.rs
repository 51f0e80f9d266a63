use pretty_assertions::assert_eq;
use rel_diagnostic::{ErrorCode, Severity};

use super::*;

#[test]
fn async_unavailable_names_the_member() {
    let diag = CodegenProblem::AsyncUnavailable {
        class: "App.Pump".to_string(),
        member: Some("channel".to_string()),
    }
    .into_diagnostic();

    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.location().as_deref(), Some("App.Pump::channel"));
    assert!(diag.message.contains("`channel`"));
}

#[test]
fn async_unavailable_without_member_points_at_class() {
    let diag = CodegenProblem::AsyncUnavailable {
        class: "Pump".to_string(),
        member: None,
    }
    .into_diagnostic();

    assert_eq!(diag.location().as_deref(), Some("Pump"));
    assert!(diag.is_error());
}

#[test]
fn conflicting_markers_is_a_note() {
    let problem = CodegenProblem::ConflictingMarkers {
        class: "Cache".to_string(),
        member: "store".to_string(),
    };
    let diag = problem.into_diagnostic();

    assert!(!problem.is_error());
    assert_eq!(diag.code, ErrorCode::W1002);
    assert_eq!(diag.severity, Severity::Note);
}

#[test]
fn include_not_releasable_is_a_warning() {
    let problem = CodegenProblem::IncludeNotReleasable {
        class: "Cache".to_string(),
        member: "count".to_string(),
    };

    assert!(!problem.is_error());
    assert!(problem.into_diagnostic().is_warning());
}

#[test]
fn malformed_identifier_describes_role() {
    let diag = CodegenProblem::MalformedIdentifier {
        class: "Cat".to_string(),
        role: IdentifierRole::NamespaceSegment,
        name: "9lives".to_string(),
        reason: "identifiers cannot start with a digit",
    }
    .into_diagnostic();

    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.message, "malformed namespace segment `9lives`");
    assert_eq!(diag.notes, vec!["identifiers cannot start with a digit".to_string()]);
}

#[test]
fn nested_accessibility_names_the_modifier() {
    let diag = CodegenProblem::NestedAccessibility {
        class: "App.Inner".to_string(),
        accessibility: rel_ir::Accessibility::ProtectedInternal,
    }
    .into_diagnostic();

    assert_eq!(diag.code, ErrorCode::E2004);
    assert_eq!(
        diag.message,
        "`protected internal` is not valid on a class declared in a namespace"
    );
    assert_eq!(diag.location().as_deref(), Some("App.Inner"));
}

#[test]
fn every_error_variant_is_fatal() {
    let class = || "C".to_string();
    let errors = [
        CodegenProblem::BaseAsyncWithoutSync { class: class() },
        CodegenProblem::SealedInheritsRelease { class: class() },
        CodegenProblem::UnsupportedMemberKind {
            class: class(),
            member: "Changed".to_string(),
            kind: "event".to_string(),
        },
        CodegenProblem::UnnamedMember {
            class: class(),
            index: 0,
        },
        CodegenProblem::NestedAccessibility {
            class: class(),
            accessibility: rel_ir::Accessibility::Private,
        },
        CodegenProblem::Internal {
            class: class(),
            message: "boom".to_string(),
        },
    ];

    for problem in &errors {
        assert!(problem.is_error(), "{problem:?}");
        assert!(problem.into_diagnostic().is_error(), "{problem:?}");
    }
}
