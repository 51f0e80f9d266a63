//! Codegen Problem Types
//!
//! Structured descriptions of everything that can go wrong while generating
//! one class. Each variant carries the context needed to produce a rich
//! [`Diagnostic`] via [`CodegenProblem::into_diagnostic`].
//!
//! Errors are fatal for the class that produced them and never affect its
//! siblings. Warnings ride along with a successfully generated unit.

use rel_diagnostic::{Diagnostic, ErrorCode};
use rel_ir::Accessibility;

/// What an identifier names, for E2001 messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdentifierRole {
    Class,
    NamespaceSegment,
    Member,
    Hook,
}

impl IdentifierRole {
    fn describe(self) -> &'static str {
        match self {
            IdentifierRole::Class => "class name",
            IdentifierRole::NamespaceSegment => "namespace segment",
            IdentifierRole::Member => "member name",
            IdentifierRole::Hook => "hook method name",
        }
    }
}

/// Problem encountered while generating one class.
///
/// Variants map to error codes E1001-E1003 (model), E2001-E2004 (emission),
/// E9001 (internal), and W1001-W1002 (classification warnings).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodegenProblem {
    // ── Model (E1xxx) ───────────────────────────────────────────────
    /// Async release is required but the target has no async interface.
    /// `member` names the included member that switched the surface on,
    /// `None` when the class declared async release itself.
    AsyncUnavailable {
        class: String,
        member: Option<String>,
    },

    /// The base implements async release but not sync release.
    BaseAsyncWithoutSync { class: String },

    /// A sealed class whose base owns the sync release surface.
    SealedInheritsRelease { class: String },

    // ── Emission (E2xxx) ────────────────────────────────────────────
    MalformedIdentifier {
        class: String,
        role: IdentifierRole,
        name: String,
        reason: &'static str,
    },

    /// A member that would take part in release has no release rule.
    UnsupportedMemberKind {
        class: String,
        member: String,
        kind: String,
    },

    /// A member declaration binds no identifiers. `index` is its position
    /// among the class's candidates.
    UnnamedMember { class: String, index: usize },

    /// The class's accessibility is only valid on nested types.
    NestedAccessibility {
        class: String,
        accessibility: Accessibility,
    },

    // ── Internal (E9001) ────────────────────────────────────────────
    Internal { class: String, message: String },

    // ── Classification warnings (W1xxx) ─────────────────────────────
    IncludeNotReleasable { class: String, member: String },

    ConflictingMarkers { class: String, member: String },
}

impl CodegenProblem {
    /// Convert this problem into a [`Diagnostic`].
    pub fn into_diagnostic(&self) -> Diagnostic {
        match self {
            // ── Model (E1xxx) ───────────────────────────────────
            Self::AsyncUnavailable {
                class,
                member: Some(member),
            } => Diagnostic::error(ErrorCode::E1001)
                .with_message(format!(
                    "member `{member}` needs async release, which the target does not provide"
                ))
                .with_class(class)
                .with_item(member)
                .with_note("an included member with async release switches on the async surface")
                .with_suggestion(format!(
                    "exclude `{member}` or generate for a target with async release"
                )),

            Self::AsyncUnavailable {
                class,
                member: None,
            } => Diagnostic::error(ErrorCode::E1001)
                .with_message("class declares async release, which the target does not provide")
                .with_class(class)
                .with_suggestion("remove the async capability or enable the async interface"),

            Self::BaseAsyncWithoutSync { class } => Diagnostic::error(ErrorCode::E1002)
                .with_message("base class implements async release but not sync release")
                .with_class(class)
                .with_note("the async path finishes through the base's sync release hook"),

            Self::SealedInheritsRelease { class } => Diagnostic::error(ErrorCode::E1003)
                .with_message("sealed class inherits its release entry point")
                .with_class(class)
                .with_note("a sealed class has no overridable hook and the entry point belongs to the base")
                .with_suggestion("unseal the class so it can override the base release hook"),

            // ── Emission (E2xxx) ────────────────────────────────
            Self::MalformedIdentifier {
                class,
                role,
                name,
                reason,
            } => Diagnostic::error(ErrorCode::E2001)
                .with_message(format!("malformed {} `{name}`", role.describe()))
                .with_class(class)
                .with_item(name)
                .with_note(*reason),

            Self::UnsupportedMemberKind {
                class,
                member,
                kind,
            } => Diagnostic::error(ErrorCode::E2002)
                .with_message(format!("cannot release `{member}`: {kind} declarations are not supported"))
                .with_class(class)
                .with_item(member)
                .with_suggestion(format!("mark `{member}` with the exclude marker")),

            Self::UnnamedMember { class, index } => Diagnostic::error(ErrorCode::E2003)
                .with_message(format!("member declaration #{index} binds no names"))
                .with_class(class)
                .with_note("this is a front-end bug; every declaration binds at least one name"),

            Self::NestedAccessibility {
                class,
                accessibility,
            } => Diagnostic::error(ErrorCode::E2004)
                .with_message(format!(
                    "`{accessibility}` is not valid on a class declared in a namespace"
                ))
                .with_class(class)
                .with_note("generated source is emitted at namespace scope, not nested")
                .with_suggestion("declare the class `public` or `internal` outside any other type"),

            // ── Internal (E9001) ────────────────────────────────
            Self::Internal { class, message } => Diagnostic::error(ErrorCode::E9001)
                .with_message(format!("internal generator error: {message}"))
                .with_class(class)
                .with_note("this is a generator bug"),

            // ── Warnings (W1xxx) ────────────────────────────────
            Self::IncludeNotReleasable { class, member } => Diagnostic::warning(ErrorCode::W1001)
                .with_message(format!(
                    "`{member}` is marked for inclusion but its type cannot be released"
                ))
                .with_class(class)
                .with_item(member)
                .with_note("the marker is ignored"),

            Self::ConflictingMarkers { class, member } => Diagnostic::note(ErrorCode::W1002)
                .with_message(format!("`{member}` is marked both include and exclude"))
                .with_class(class)
                .with_item(member)
                .with_note("exclusion wins; the member is left untouched"),
        }
    }

    /// Returns `true` if this problem stops the class from generating.
    pub fn is_error(&self) -> bool {
        !matches!(
            self,
            Self::IncludeNotReleasable { .. } | Self::ConflictingMarkers { .. }
        )
    }
}

#[cfg(test)]
mod tests;
