// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Driver tests.
//!
//! Run the command handlers against the fixtures in `tests/fixtures/`, with
//! buffers standing in for stdout and stderr and temporary output
//! directories.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rel_diagnostic::emitter::ColorMode;
use relc::commands::{
    generate_file, plan_file, write_markers, GenerateOptions, OutputFormat, RunSummary,
};
use relc::DriverError;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn quiet_options() -> GenerateOptions {
    GenerateOptions {
        color: ColorMode::Never,
        ..GenerateOptions::default()
    }
}

/// Run `generate` on the models fixture; returns the summary, stdout, and
/// stderr.
fn generate(options: &GenerateOptions) -> (RunSummary, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = generate_file(&fixture("models.json"), options, &mut out, &mut err).unwrap();
    (
        summary,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn generate_writes_one_file_per_class() {
    let dir = tempfile::tempdir().unwrap();
    let options = GenerateOptions {
        out_dir: Some(dir.path().to_path_buf()),
        ..quiet_options()
    };

    let (summary, out, err) = generate(&options);

    assert_eq!(
        summary,
        RunSummary {
            generated: 2,
            skipped: 1,
            failed: 1,
            warnings: 1,
        }
    );
    assert!(!summary.is_success());
    assert!(out.is_empty());

    let mut files: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    files.sort();
    assert_eq!(files, vec!["App.Net.Session.g.cs", "App.Reader.g.cs"]);

    let session = fs::read_to_string(dir.path().join("App.Net.Session.g.cs")).unwrap();
    assert!(session.contains("public partial class Session : IDisposable, IAsyncDisposable"));
    assert!(session.contains("this.Close();"));
    assert!(!session.contains("this.buffer"));

    assert!(err.contains("error[E1002]"));
    assert!(err.contains("warning[W1001]"));
}

#[test]
fn generate_prints_units_without_out_dir() {
    let (_, out, _) = generate(&quiet_options());

    let headers: Vec<_> = out.lines().filter(|line| line.starts_with("==> ")).collect();
    assert_eq!(
        headers,
        vec!["==> App.Net.Session.g.cs <==", "==> App.Reader.g.cs <=="]
    );
}

#[test]
fn sequential_and_parallel_runs_agree() {
    let (parallel_summary, parallel, _) = generate(&quiet_options());
    let (sequential_summary, sequential, _) = generate(&GenerateOptions {
        parallel: false,
        ..quiet_options()
    });

    assert_eq!(parallel_summary, sequential_summary);
    assert_eq!(parallel, sequential);
}

#[test]
fn json_diagnostics_list_codes_in_class_order() {
    let (_, _, err) = generate(&GenerateOptions {
        format: OutputFormat::Json,
        ..quiet_options()
    });

    let diagnostics: serde_json::Value = serde_json::from_str(&err).unwrap();
    let codes: Vec<_> = diagnostics
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["E1002", "W1001"]);
}

#[test]
fn missing_async_interface_fails_async_classes() {
    let (summary, out, err) = generate(&GenerateOptions {
        no_async_interface: true,
        ..quiet_options()
    });

    assert_eq!(summary.generated, 1);
    assert_eq!(summary.failed, 2);
    assert!(!out.contains("Session.g.cs"));
    assert!(err.contains("error[E1001]"));
}

#[test]
fn config_file_and_flags_shape_output() {
    let (_, out, _) = generate(&GenerateOptions {
        config_path: Some(fixture("config.json")),
        no_docs: true,
        ..quiet_options()
    });

    assert!(out.contains("\n  public partial class Session : IDisposable, IAsyncDisposable\n"));
    assert!(!out.contains("///"));
}

#[test]
fn invalid_config_is_a_driver_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.json");
    fs::write(&config, r#"{ "indent": 2 }"#).unwrap();
    let options = GenerateOptions {
        config_path: Some(config),
        ..quiet_options()
    };

    let result = generate_file(
        &fixture("models.json"),
        &options,
        &mut Vec::<u8>::new(),
        &mut Vec::<u8>::new(),
    );
    assert!(matches!(result, Err(DriverError::Config { .. })));
}

#[test]
fn missing_models_file_is_a_driver_error() {
    let result = generate_file(
        &fixture("nope.json"),
        &quiet_options(),
        &mut Vec::<u8>::new(),
        &mut Vec::<u8>::new(),
    );
    assert!(matches!(result, Err(DriverError::Read { .. })));
}

#[test]
fn plan_shows_decisions_and_operations() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = plan_file(&fixture("models.json"), None, &mut out, &mut err).unwrap();
    let out = String::from_utf8(out).unwrap();
    let err = String::from_utf8(err).unwrap();

    assert_eq!(summary.failed, 1);
    assert!(out.contains("App.Net.Session -> App.Net.Session.g.cs"));
    assert!(out.contains("  members: socket\n"));
    assert!(out.contains("  sync hooks: Close\n"));
    assert!(out.contains("  async surface: yes\n"));
    assert!(out.contains("    AsyncCore (ProtectedVirtual)"));
    assert!(out.contains("Plain: skipped"));
    assert!(out.contains("Broken: failed"));
    assert!(err.contains("error[E1002]"));
}

#[test]
fn markers_use_configured_namespace() {
    let dir = tempfile::tempdir().unwrap();

    let written = write_markers(
        Some(dir.path()),
        Some(&fixture("config.json")),
        &mut Vec::<u8>::new(),
    )
    .unwrap();

    assert_eq!(written, 6);
    let source =
        fs::read_to_string(dir.path().join("Acme.Release.DisposeAllAttribute.g.cs")).unwrap();
    assert!(source.contains("namespace Acme.Release"));
    assert!(source.contains("  [AttributeUsage(AttributeTargets.Class, Inherited = false)]"));
}

#[test]
fn markers_print_without_out_dir() {
    let mut out = Vec::new();
    write_markers(None, None, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(out.matches("==> DisposeGenerator.").count(), 6);
    assert!(out.contains("internal sealed class AsyncDisposerAttribute : Attribute { }"));
}
