//! Command handlers for the `relc` CLI.
//!
//! Each handler writes its normal output to `out` and diagnostics to `err`,
//! so the binary passes stdout and stderr while tests pass buffers. Shared
//! helpers for configuration and output files live here.

use std::fs;
use std::path::Path;

use rel_codegen::GeneratorConfig;

use crate::input::load_config;
use crate::DriverError;

mod explain;
mod generate;
mod markers;
mod plan;

pub use explain::explain_error;
pub use generate::{generate_file, generate_models, GenerateOptions, OutputFormat, RunSummary};
pub use markers::write_markers;
pub use plan::plan_file;

/// The configuration file at `path`, or the defaults.
pub(crate) fn resolve_config(path: Option<&Path>) -> Result<GeneratorConfig, DriverError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Write `contents` to `dir/name`, creating `dir` if needed.
pub(crate) fn write_output(dir: &Path, name: &str, contents: &str) -> Result<(), DriverError> {
    fs::create_dir_all(dir).map_err(|source| DriverError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|source| DriverError::Write { path, source })
}
