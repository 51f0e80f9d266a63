//! Class, member, and hook records.

use std::fmt;

use smallvec::SmallVec;

/// Identifiers bound by one member declaration.
///
/// A field group (`Stream a, b;`) binds several names to one declared type,
/// but the common case is a single name, so one slot is stored inline.
pub type MemberNames = SmallVec<[String; 1]>;

/// Declared accessibility of a candidate class.
///
/// The generated partial declaration repeats the accessibility of the
/// author's declaration so both halves agree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
    ProtectedInternal,
    PrivateProtected,
}

impl Accessibility {
    /// Source keywords for this accessibility.
    pub fn keywords(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Private => "private",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::PrivateProtected => "private protected",
        }
    }

    /// Whether a type declared directly in a namespace may carry this
    /// accessibility. The rest are only valid on nested types.
    pub fn is_valid_at_namespace_scope(self) -> bool {
        matches!(self, Accessibility::Public | Accessibility::Internal)
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keywords())
    }
}

/// Which policy decides whether an unmarked member takes part in cascading
/// release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InclusionPolicy {
    /// Default: only members marked "force include" participate.
    OptIn,
    /// The class is marked "include all by default": every releasable member
    /// participates unless marked "force exclude".
    OptOut,
}

/// Declaration shape of a member candidate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MemberKind {
    Field,
    Property,
    /// A declaration kind the front-end passed through without a release
    /// rule (events, indexers, ...). Carries the front-end's name for it.
    Other(String),
}

impl MemberKind {
    pub fn describe(&self) -> &str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Property => "property",
            MemberKind::Other(kind) => kind,
        }
    }
}

/// Phase in which an author-written hook method runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HookRole {
    /// Runs on explicit release only. May touch managed state.
    SyncHook,
    /// Runs on every release path, including the finalizer fallback.
    FinalizeHook,
    /// Awaited during asynchronous release.
    AsyncHook,
}

impl fmt::Display for HookRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookRole::SyncHook => write!(f, "sync hook"),
            HookRole::FinalizeHook => write!(f, "finalize hook"),
            HookRole::AsyncHook => write!(f, "async hook"),
        }
    }
}

/// A method the class author marked to take part in release.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HookMethod {
    pub name: String,
    pub role: HookRole,
}

impl HookMethod {
    pub fn new(name: impl Into<String>, role: HookRole) -> Self {
        HookMethod {
            name: name.into(),
            role,
        }
    }
}

/// A field or property declared on a candidate class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MemberCandidate {
    pub names: MemberNames,
    pub kind: MemberKind,
    pub declared_type_supports_sync_release: bool,
    pub declared_type_supports_async_release: bool,
    pub explicit_include: bool,
    pub explicit_exclude: bool,
    /// `false` for read-only fields and get-only properties, whose
    /// reference cannot be cleared after release.
    pub assignable: bool,
}

impl Default for MemberCandidate {
    fn default() -> Self {
        MemberCandidate {
            names: MemberNames::new(),
            kind: MemberKind::Field,
            declared_type_supports_sync_release: false,
            declared_type_supports_async_release: false,
            explicit_include: false,
            explicit_exclude: false,
            assignable: true,
        }
    }
}

impl MemberCandidate {
    /// A single-name field.
    pub fn field(name: impl Into<String>) -> Self {
        MemberCandidate {
            names: smallvec::smallvec![name.into()],
            ..Self::default()
        }
    }

    /// A field group binding several names to one declared type.
    pub fn field_group<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemberCandidate {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A property.
    pub fn property(name: impl Into<String>) -> Self {
        MemberCandidate {
            names: smallvec::smallvec![name.into()],
            kind: MemberKind::Property,
            ..Self::default()
        }
    }

    /// Replace the declaration kind.
    #[must_use]
    pub fn with_kind(mut self, kind: MemberKind) -> Self {
        self.kind = kind;
        self
    }

    /// The declared type supports synchronous release.
    #[must_use]
    pub fn releasable(mut self) -> Self {
        self.declared_type_supports_sync_release = true;
        self
    }

    /// The declared type supports asynchronous release.
    #[must_use]
    pub fn async_releasable(mut self) -> Self {
        self.declared_type_supports_async_release = true;
        self
    }

    /// Mark "force include".
    #[must_use]
    pub fn include(mut self) -> Self {
        self.explicit_include = true;
        self
    }

    /// Mark "force exclude".
    #[must_use]
    pub fn exclude(mut self) -> Self {
        self.explicit_exclude = true;
        self
    }

    /// The member cannot be reassigned after construction.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.assignable = false;
        self
    }
}

/// Normalized description of one candidate class.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ClassModel {
    pub name: String,
    /// Enclosing namespace, `None` for the global namespace.
    pub namespace: Option<String>,
    pub accessibility: Accessibility,
    pub is_sealed: bool,
    pub implements_sync_release: bool,
    pub implements_async_release: bool,
    pub base_implements_sync_release: bool,
    pub base_implements_async_release: bool,
    /// Class-level "include all by default" marker.
    pub include_all_by_default: bool,
    pub candidate_members: Vec<MemberCandidate>,
    pub hook_methods: Vec<HookMethod>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        ClassModel {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    #[must_use]
    pub fn sync_release(mut self) -> Self {
        self.implements_sync_release = true;
        self
    }

    #[must_use]
    pub fn async_release(mut self) -> Self {
        self.implements_async_release = true;
        self
    }

    #[must_use]
    pub fn base_sync_release(mut self) -> Self {
        self.base_implements_sync_release = true;
        self
    }

    #[must_use]
    pub fn base_async_release(mut self) -> Self {
        self.base_implements_async_release = true;
        self
    }

    #[must_use]
    pub fn include_all(mut self) -> Self {
        self.include_all_by_default = true;
        self
    }

    #[must_use]
    pub fn member(mut self, member: MemberCandidate) -> Self {
        self.candidate_members.push(member);
        self
    }

    #[must_use]
    pub fn hook(mut self, name: impl Into<String>, role: HookRole) -> Self {
        self.hook_methods.push(HookMethod::new(name, role));
        self
    }

    /// The inclusion policy selected by the class-level marker.
    pub fn inclusion_policy(&self) -> InclusionPolicy {
        if self.include_all_by_default {
            InclusionPolicy::OptOut
        } else {
            InclusionPolicy::OptIn
        }
    }

    /// Whether the class declares any release capability of its own.
    ///
    /// Classes that declare neither are not candidates for generation.
    pub fn declares_release(&self) -> bool {
        self.implements_sync_release || self.implements_async_release
    }

    /// Hook methods with the given role, in declaration order.
    pub fn hooks_with_role(&self, role: HookRole) -> impl Iterator<Item = &HookMethod> {
        self.hook_methods.iter().filter(move |h| h.role == role)
    }

    /// Namespace-qualified name (`Ns.Inner.Name`, or `Name` when global).
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}
