//! Identifier checks for names that end up in emitted source.
//!
//! The front-end hands over names as plain strings. Anything that would not
//! survive as a C# identifier is rejected here (E2001) before planning, so
//! the emitter can interpolate names without escaping. The class's
//! accessibility must also be valid at namespace scope (E2004).

use rel_ir::ClassModel;

use crate::problem::{CodegenProblem, IdentifierRole};

/// Reserved C# keywords. Contextual keywords (`async`, `var`, ...) are valid
/// identifiers and are not listed.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Check one identifier. `@keyword` is accepted, bare keywords are not.
pub fn check_identifier(name: &str) -> Result<(), &'static str> {
    let (verbatim, body) = match name.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, name),
    };

    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return Err("identifiers cannot be empty");
    };
    if first.is_ascii_digit() {
        return Err("identifiers cannot start with a digit");
    }
    if !(first.is_alphabetic() || first == '_') {
        return Err("identifiers must start with a letter or underscore");
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return Err("identifiers may only contain letters, digits, and underscores");
    }
    if !verbatim && KEYWORDS.contains(&body) {
        return Err("reserved keywords must be escaped with `@`");
    }
    Ok(())
}

/// Check every name in `model`, reporting each malformed identifier, each
/// member declaration without names, and a nested-only accessibility.
pub fn validate_model(model: &ClassModel) -> Vec<CodegenProblem> {
    let class = model.qualified_name();
    let mut problems = Vec::new();

    let mut check = |role: IdentifierRole, name: &str| {
        if let Err(reason) = check_identifier(name) {
            problems.push(CodegenProblem::MalformedIdentifier {
                class: class.clone(),
                role,
                name: name.to_string(),
                reason,
            });
        }
    };

    check(IdentifierRole::Class, &model.name);
    if let Some(namespace) = &model.namespace {
        for segment in namespace.split('.') {
            check(IdentifierRole::NamespaceSegment, segment);
        }
    }
    for member in &model.candidate_members {
        for name in &member.names {
            check(IdentifierRole::Member, name);
        }
    }
    for hook in &model.hook_methods {
        check(IdentifierRole::Hook, &hook.name);
    }

    if !model.accessibility.is_valid_at_namespace_scope() {
        problems.push(CodegenProblem::NestedAccessibility {
            class: class.clone(),
            accessibility: model.accessibility,
        });
    }

    for (index, member) in model.candidate_members.iter().enumerate() {
        if member.names.is_empty() {
            problems.push(CodegenProblem::UnnamedMember {
                class: class.clone(),
                index,
            });
        }
    }

    problems
}

#[cfg(test)]
mod tests;
