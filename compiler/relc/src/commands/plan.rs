//! The `plan` command: show what would be generated, without emitting.

use std::io::Write;
use std::path::Path;

use rel_codegen::synth::{self, Stmt};
use rel_codegen::{plan_class, CodegenProblem, GenerationPlan};
use rel_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use rel_diagnostic::Diagnostic;

use super::{resolve_config, RunSummary};
use crate::input::load_models;
use crate::DriverError;

/// Print the derived plan and synthesized operations of every class in
/// `path`. Problems go to `err` as diagnostics.
pub fn plan_file(
    path: &Path,
    config_path: Option<&Path>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunSummary, DriverError> {
    let models = load_models(path)?;
    let config = resolve_config(config_path)?;

    let mut summary = RunSummary::default();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    for model in &models {
        match plan_class(model, &config) {
            Ok(Some(planned)) => {
                summary.generated += 1;
                print_plan(&planned.plan, out);
                diagnostics.extend(planned.warnings.iter().map(CodegenProblem::into_diagnostic));
            }
            Ok(None) => {
                summary.skipped += 1;
                let _ = writeln!(
                    out,
                    "{}: skipped, no release capability declared",
                    model.qualified_name()
                );
            }
            Err(problems) => {
                summary.failed += 1;
                let _ = writeln!(out, "{}: failed", model.qualified_name());
                diagnostics.extend(problems.iter().map(CodegenProblem::into_diagnostic));
            }
        }
    }
    summary.warnings = diagnostics.iter().filter(|d| d.is_warning()).count();

    let mut emitter = TerminalEmitter::with_color_mode(err, ColorMode::Never, false);
    emitter.emit_all(&diagnostics);
    emitter.flush();
    Ok(summary)
}

fn print_plan(plan: &GenerationPlan, out: &mut dyn Write) {
    let _ = writeln!(out, "{} -> {}", plan.qualified_name(), plan.hint_name());
    let _ = writeln!(out, "  sealed: {}", yes_no(plan.is_sealed));
    let _ = writeln!(out, "  members: {}", list(plan.member_names()));
    let _ = writeln!(out, "  cleared: {}", list(plan.clearable_names()));
    let _ = writeln!(out, "  sync hooks: {}", list(plan.sync_hooks.iter().map(String::as_str)));
    let _ = writeln!(
        out,
        "  finalize hooks: {}",
        list(plan.finalize_hooks.iter().map(String::as_str))
    );
    let _ = writeln!(out, "  async hooks: {}", list(plan.async_hooks.iter().map(String::as_str)));
    let _ = writeln!(out, "  async surface: {}", yes_no(plan.needs_async_surface));
    let _ = writeln!(out, "  finalizer: {}", yes_no(plan.needs_finalizer));

    let protocol = synth::synthesize(plan);
    let _ = writeln!(out, "  operations:");
    for op in &protocol.operations {
        let _ = writeln!(out, "    {:?} ({:?})", op.kind, op.dispatch);
        print_body(&op.body, 3, out);
    }
}

fn print_body(body: &[Stmt], depth: usize, out: &mut dyn Write) {
    let indent = "  ".repeat(depth);
    for stmt in body {
        if let Stmt::IfExplicit(inner) = stmt {
            let _ = writeln!(out, "{indent}IfExplicit");
            print_body(inner, depth + 1, out);
        } else {
            let _ = writeln!(out, "{indent}{stmt:?}");
        }
    }
}

fn list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
