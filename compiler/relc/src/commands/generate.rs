//! The `generate` command: emit the release protocol for every class.

use std::io::Write;
use std::path::{Path, PathBuf};

use rel_codegen::{ClassOutcome, CodegenProblem, GeneratedUnit};
use rel_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use rel_diagnostic::Diagnostic;
use rel_ir::ClassModel;

use super::{resolve_config, write_output};
use crate::input::load_models;
use crate::pipeline::run_classes;
use crate::DriverError;

/// How diagnostics are rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

/// Options for `relc generate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Write one file per unit here instead of printing sources.
    pub out_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub parallel: bool,
    pub format: OutputFormat,
    pub color: ColorMode,
    /// Whether diagnostics go to a terminal (used for `ColorMode::Auto`).
    pub is_tty: bool,
    pub no_async_interface: bool,
    pub no_docs: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            out_dir: None,
            config_path: None,
            parallel: true,
            format: OutputFormat::Terminal,
            color: ColorMode::Auto,
            is_tty: false,
            no_async_interface: false,
            no_docs: false,
        }
    }
}

impl GenerateOptions {
    /// Parse command-line options. Positional arguments are ignored.
    pub fn parse(args: &[String]) -> Result<Self, DriverError> {
        let mut options = GenerateOptions::default();

        for arg in args {
            if let Some(dir) = arg.strip_prefix("--out=") {
                options.out_dir = Some(PathBuf::from(dir));
            } else if let Some(path) = arg.strip_prefix("--config=") {
                options.config_path = Some(PathBuf::from(path));
            } else if arg == "--no-parallel" {
                options.parallel = false;
            } else if let Some(format) = arg.strip_prefix("--format=") {
                options.format = format.parse().map_err(|()| {
                    DriverError::Usage(format!(
                        "unknown format '{format}', options: terminal, json"
                    ))
                })?;
            } else if let Some(color) = arg.strip_prefix("--color=") {
                options.color = color.parse().map_err(|()| {
                    DriverError::Usage(format!(
                        "unknown color mode '{color}', options: auto, always, never"
                    ))
                })?;
            } else if arg == "--no-async-interface" {
                options.no_async_interface = true;
            } else if arg == "--no-docs" {
                options.no_docs = true;
            } else if arg.starts_with('-') {
                return Err(DriverError::Usage(format!("unknown option '{arg}'")));
            }
        }

        Ok(options)
    }
}

/// Counts from one generation run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub warnings: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Load models from `path` and generate them.
pub fn generate_file(
    path: &Path,
    options: &GenerateOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunSummary, DriverError> {
    let models = load_models(path)?;
    generate_models(&models, options, out, err)
}

/// Generate every model, write the units, and report diagnostics.
///
/// Units go to `options.out_dir` when set, otherwise to `out` with a header
/// line naming each unit. A failed class produces no unit.
pub fn generate_models(
    models: &[ClassModel],
    options: &GenerateOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunSummary, DriverError> {
    let mut config = resolve_config(options.config_path.as_deref())?;
    if options.no_async_interface {
        config.async_interface_available = false;
    }
    if options.no_docs {
        config.emit_doc_comments = false;
    }

    let outcomes = run_classes(models, &config, options.parallel);

    let mut summary = RunSummary::default();
    let mut units: Vec<GeneratedUnit> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    for outcome in outcomes {
        match outcome {
            ClassOutcome::Generated(unit) => {
                summary.generated += 1;
                diagnostics.extend(unit.warnings.iter().map(CodegenProblem::into_diagnostic));
                units.push(unit);
            }
            ClassOutcome::Skipped => summary.skipped += 1,
            ClassOutcome::Failed(problems) => {
                summary.failed += 1;
                diagnostics.extend(problems.iter().map(CodegenProblem::into_diagnostic));
            }
        }
    }
    summary.warnings = diagnostics.iter().filter(|d| d.is_warning()).count();

    for unit in &units {
        match &options.out_dir {
            Some(dir) => write_output(dir, &unit.hint_name, &unit.source)?,
            None => {
                let _ = writeln!(out, "==> {} <==", unit.hint_name);
                let _ = writeln!(out, "{}", unit.source);
            }
        }
    }

    report(&diagnostics, &summary, options, err);
    tracing::debug!(?summary, "generation finished");
    Ok(summary)
}

fn report(
    diagnostics: &[Diagnostic],
    summary: &RunSummary,
    options: &GenerateOptions,
    err: &mut dyn Write,
) {
    match options.format {
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(err);
            emitter.begin();
            emitter.emit_all(diagnostics);
            emitter.end();
            emitter.flush();
        }
        OutputFormat::Terminal => {
            let mut emitter = TerminalEmitter::with_color_mode(err, options.color, options.is_tty);
            emitter.emit_all(diagnostics);
            emitter.emit_summary(summary.failed, summary.warnings);
            emitter.flush();
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_every_option() {
        let options = GenerateOptions::parse(&args(&[
            "models.json",
            "--out=gen",
            "--config=relc.json",
            "--no-parallel",
            "--format=json",
            "--color=never",
            "--no-async-interface",
            "--no-docs",
        ]))
        .unwrap();

        assert_eq!(
            options,
            GenerateOptions {
                out_dir: Some(PathBuf::from("gen")),
                config_path: Some(PathBuf::from("relc.json")),
                parallel: false,
                format: OutputFormat::Json,
                color: ColorMode::Never,
                is_tty: false,
                no_async_interface: true,
                no_docs: true,
            }
        );
    }

    #[test]
    fn rejects_bad_options() {
        for bad in ["--format=xml", "--color=sometimes", "--verbose"] {
            assert!(matches!(
                GenerateOptions::parse(&args(&[bad])),
                Err(DriverError::Usage(_))
            ));
        }
    }
}
