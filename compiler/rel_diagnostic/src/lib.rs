//! Diagnostic system for generator error reporting.
//!
//! Every problem the generator reports carries:
//! - An error code for searchability (`relc explain E1001`)
//! - A clear message (what went wrong)
//! - The class it concerns
//! - Notes (why it's wrong) and suggestions (how to fix)
//!
//! Failures are isolated per class: a diagnostic with error severity means the
//! class it names produced no output, while its siblings are unaffected.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
