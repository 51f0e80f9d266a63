//! Marker attribute definitions.
//!
//! The six markers a class author uses to steer generation. The front-end
//! resolves them into [`ClassModel`](rel_ir::ClassModel) facts; this table
//! only describes them and renders their attribute declarations so they can
//! be added to a compilation.

use rel_ir::HookRole;

use crate::emit::SourceWriter;
use crate::GeneratorConfig;

/// Declarations a marker may be applied to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerTarget {
    Class,
    /// Fields and properties.
    Member,
    Method,
}

impl MarkerTarget {
    fn attribute_targets(self) -> &'static str {
        match self {
            MarkerTarget::Class => "AttributeTargets.Class",
            MarkerTarget::Member => "AttributeTargets.Field | AttributeTargets.Property",
            MarkerTarget::Method => "AttributeTargets.Method",
        }
    }
}

/// The model fact a marker resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerMeaning {
    /// `ClassModel::include_all_by_default`.
    IncludeAll,
    /// `MemberCandidate::explicit_include`.
    ForceInclude,
    /// `MemberCandidate::explicit_exclude`.
    ForceExclude,
    /// A `HookMethod` with this role.
    Hook(HookRole),
}

/// One marker attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MarkerDefinition {
    pub name: &'static str,
    pub target: MarkerTarget,
    pub meaning: MarkerMeaning,
    /// Documentation lines for the emitted declaration.
    pub summary: &'static [&'static str],
}

impl MarkerDefinition {
    /// Name of the emitted source unit, e.g. `DisposeGenerator.DisposeAllAttribute.g.cs`.
    pub fn hint_name(&self, config: &GeneratorConfig) -> String {
        format!("{}.{}.g.cs", config.vocabulary.marker_namespace, self.name)
    }

    /// Render the attribute declaration.
    pub fn render(&self, config: &GeneratorConfig) -> String {
        let mut w = SourceWriter::new(config.indent_size);
        w.writeln("// <auto-generated/>");
        w.writeln("using System;");
        w.newline();
        w.writeln(&format!("namespace {}", config.vocabulary.marker_namespace));
        w.open_block();
        if config.emit_doc_comments {
            w.writeln("/// <summary>");
            for line in self.summary {
                w.writeln(&format!("/// {line}"));
            }
            w.writeln("/// </summary>");
        }
        w.writeln(&format!(
            "[AttributeUsage({}, Inherited = false)]",
            self.target.attribute_targets()
        ));
        w.writeln(&format!(
            "internal sealed class {} : Attribute {{ }}",
            self.name
        ));
        w.close_block();
        w.take_output()
    }
}

/// Every marker, in a fixed order.
pub static MARKERS: &[MarkerDefinition] = &[
    MarkerDefinition {
        name: "DisposeAllAttribute",
        target: MarkerTarget::Class,
        meaning: MarkerMeaning::IncludeAll,
        summary: &[
            "Releases every member whose type supports release, unless the member",
            "is marked with <see cref=\"ExcludeDisposeAttribute\"/>.",
        ],
    },
    MarkerDefinition {
        name: "IncludeDisposeAttribute",
        target: MarkerTarget::Member,
        meaning: MarkerMeaning::ForceInclude,
        summary: &["Releases this member along with its owner."],
    },
    MarkerDefinition {
        name: "ExcludeDisposeAttribute",
        target: MarkerTarget::Member,
        meaning: MarkerMeaning::ForceExclude,
        summary: &[
            "Leaves this member untouched when its owner is released.",
            "Takes precedence over <see cref=\"IncludeDisposeAttribute\"/>.",
        ],
    },
    MarkerDefinition {
        name: "DisposerAttribute",
        target: MarkerTarget::Method,
        meaning: MarkerMeaning::Hook(HookRole::SyncHook),
        summary: &[
            "Runs this method when the owner is released explicitly,",
            "but not from the finalizer.",
        ],
    },
    MarkerDefinition {
        name: "FinalizerAttribute",
        target: MarkerTarget::Method,
        meaning: MarkerMeaning::Hook(HookRole::FinalizeHook),
        summary: &[
            "Runs this method on every release path, including the finalizer.",
            "Use it for unmanaged resources only.",
        ],
    },
    MarkerDefinition {
        name: "AsyncDisposerAttribute",
        target: MarkerTarget::Method,
        meaning: MarkerMeaning::Hook(HookRole::AsyncHook),
        summary: &["Awaits this method when the owner is released asynchronously."],
    },
];

/// Look up a marker by attribute name, with or without the `Attribute` suffix.
pub fn find_marker(name: &str) -> Option<&'static MarkerDefinition> {
    MARKERS
        .iter()
        .find(|m| m.name == name || m.name.strip_suffix("Attribute") == Some(name))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn six_markers_cover_every_fact() {
        assert_eq!(MARKERS.len(), 6);
        for role in [HookRole::SyncHook, HookRole::FinalizeHook, HookRole::AsyncHook] {
            assert!(MARKERS.iter().any(|m| m.meaning == MarkerMeaning::Hook(role)));
        }
    }

    #[test]
    fn lookup_accepts_short_names() {
        assert_eq!(find_marker("DisposeAll").map(|m| m.target), Some(MarkerTarget::Class));
        assert_eq!(
            find_marker("ExcludeDisposeAttribute").map(|m| m.meaning),
            Some(MarkerMeaning::ForceExclude)
        );
        assert!(find_marker("Dispose").is_none());
    }

    #[test]
    fn render_include_marker() {
        let config = GeneratorConfig::default();
        let marker = find_marker("IncludeDispose").map(|m| m.render(&config));

        assert_eq!(
            marker.as_deref(),
            Some(
                "// <auto-generated/>
using System;

namespace DisposeGenerator
{
    /// <summary>
    /// Releases this member along with its owner.
    /// </summary>
    [AttributeUsage(AttributeTargets.Field | AttributeTargets.Property, Inherited = false)]
    internal sealed class IncludeDisposeAttribute : Attribute { }
}
"
            )
        );
    }

    #[test]
    fn hint_name_uses_marker_namespace() {
        let config = GeneratorConfig::default();
        assert_eq!(
            MARKERS[0].hint_name(&config),
            "DisposeGenerator.DisposeAllAttribute.g.cs"
        );
    }
}
