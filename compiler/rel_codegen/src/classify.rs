//! Member classification.
//!
//! Decides which candidate members take part in cascading release under the
//! class's inclusion policy. Exclusion always wins over inclusion.

use rel_ir::{ClassModel, InclusionPolicy, MemberCandidate, MemberKind, MemberNames};

use crate::problem::CodegenProblem;
use crate::GeneratorConfig;

/// A member that is released along with its owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncludedMember {
    pub names: MemberNames,
    pub kind: MemberKind,
    /// Whether the reference is cleared after release.
    pub assignable: bool,
    /// Declared type supports async release. Switches on the class's
    /// async surface.
    pub supports_async_release: bool,
}

/// Output of [`classify`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    /// Included members, in declaration order.
    pub included: Vec<IncludedMember>,
    /// Warnings, plus E2002 for included members with no release rule.
    pub problems: Vec<CodegenProblem>,
}

impl Classification {
    pub fn has_errors(&self) -> bool {
        self.problems.iter().any(CodegenProblem::is_error)
    }
}

/// Display label for a member declaration (`a, b` for a field group).
pub(crate) fn member_label(member: &MemberCandidate) -> String {
    member.names.join(", ")
}

/// Classify every candidate member of `model`.
///
/// Members without names are skipped here; validation reports them.
#[tracing::instrument(level = "debug", skip_all, fields(class = %model.name))]
pub fn classify(model: &ClassModel, config: &GeneratorConfig) -> Classification {
    let class = model.qualified_name();
    let policy = model.inclusion_policy();
    let mut result = Classification::default();

    for member in &model.candidate_members {
        if member.names.is_empty() {
            continue;
        }
        let label = member_label(member);
        let releasable = member.declared_type_supports_sync_release;

        if member.explicit_include && member.explicit_exclude {
            result.problems.push(CodegenProblem::ConflictingMarkers {
                class: class.clone(),
                member: label.clone(),
            });
        } else if member.explicit_include && !releasable {
            result.problems.push(CodegenProblem::IncludeNotReleasable {
                class: class.clone(),
                member: label.clone(),
            });
        }

        if !is_selected(member, policy, config) {
            tracing::trace!(member = %label, "not included");
            continue;
        }

        if let MemberKind::Other(kind) = &member.kind {
            result.problems.push(CodegenProblem::UnsupportedMemberKind {
                class: class.clone(),
                member: label,
                kind: kind.clone(),
            });
            continue;
        }

        tracing::trace!(
            member = %label,
            supports_async = member.declared_type_supports_async_release,
            "included"
        );
        result.included.push(IncludedMember {
            names: member.names.clone(),
            kind: member.kind.clone(),
            assignable: member.assignable,
            supports_async_release: member.declared_type_supports_async_release,
        });
    }

    tracing::debug!(
        ?policy,
        included = result.included.len(),
        problems = result.problems.len(),
        "classification complete"
    );
    result
}

/// Inclusion rule for a single member.
fn is_selected(member: &MemberCandidate, policy: InclusionPolicy, config: &GeneratorConfig) -> bool {
    if !member.declared_type_supports_sync_release || member.explicit_exclude {
        return false;
    }
    if member.explicit_include {
        return true;
    }
    match policy {
        InclusionPolicy::OptIn => false,
        InclusionPolicy::OptOut => {
            member.kind != MemberKind::Property || config.properties_follow_policy
        }
    }
}
