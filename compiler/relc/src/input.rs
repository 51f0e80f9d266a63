//! Input files: class models and generator configuration.

use std::fs;
use std::path::Path;

use rel_codegen::GeneratorConfig;
use rel_ir::ClassModel;
use serde::Deserialize;

use crate::DriverError;

/// Accepted shapes of a models file.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelFile {
    List(Vec<ClassModel>),
    Wrapped { classes: Vec<ClassModel> },
}

/// Parse class models from JSON text: either an array of models or an
/// object with a `classes` array.
pub fn parse_models(text: &str) -> Result<Vec<ClassModel>, serde_json::Error> {
    let file: ModelFile = serde_json::from_str(text)?;
    Ok(match file {
        ModelFile::List(classes) | ModelFile::Wrapped { classes } => classes,
    })
}

/// Load class models from a JSON file.
pub fn load_models(path: &Path) -> Result<Vec<ClassModel>, DriverError> {
    let text = read(path)?;
    let models = parse_models(&text).map_err(|source| DriverError::Models {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), classes = models.len(), "models loaded");
    Ok(models)
}

/// Load a generator configuration from a JSON file. Missing keys keep their
/// defaults; unknown keys are rejected.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, DriverError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| DriverError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })
}
