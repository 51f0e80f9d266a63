//! Driver errors.
//!
//! Problems with a class are diagnostics, not errors: they are reported and
//! the run continues. A [`DriverError`] means the run itself could not go on.

use std::io;
use std::path::PathBuf;

use rel_diagnostic::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("cannot read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid class models in '{}': {source}", path.display())]
    Models {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid configuration in '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("unknown error code: {0}")]
    UnknownCode(String),

    #[error("no documentation available for {0}")]
    Undocumented(ErrorCode),
}
