//! The `markers` command: emit the marker attribute declarations.

use std::io::Write;
use std::path::Path;

use rel_codegen::markers::MARKERS;

use super::{resolve_config, write_output};
use crate::DriverError;

/// Write every marker declaration to `out_dir`, or print them to `out`.
pub fn write_markers(
    out_dir: Option<&Path>,
    config_path: Option<&Path>,
    out: &mut dyn Write,
) -> Result<usize, DriverError> {
    let config = resolve_config(config_path)?;

    for marker in MARKERS {
        let name = marker.hint_name(&config);
        let source = marker.render(&config);
        match out_dir {
            Some(dir) => write_output(dir, &name, &source)?,
            None => {
                let _ = writeln!(out, "==> {name} <==");
                let _ = writeln!(out, "{source}");
            }
        }
    }

    Ok(MARKERS.len())
}
