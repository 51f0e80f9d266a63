//! Embedded error documentation for `relc explain` support.
//!
//! Each error code has a markdown file that explains the error and how to
//! fix it. These are embedded at compile time and can be accessed via
//! `ErrorDocs::get()`.
//!
//! # Adding New Documentation
//!
//! 1. Create a new file `EXXXX.md` in this directory
//! 2. Add an entry to the `DOCS` array below

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Get the documentation for an error code.
    ///
    /// Returns `Some(markdown)` if documentation exists for the code,
    /// `None` otherwise.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// Get all documented error codes.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    /// Check if an error code has documentation.
    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    // Model errors (E1xxx)
    (ErrorCode::E1001, include_str!("E1001.md")),
    (ErrorCode::E1002, include_str!("E1002.md")),
    (ErrorCode::E1003, include_str!("E1003.md")),
    // Emission errors (E2xxx)
    (ErrorCode::E2001, include_str!("E2001.md")),
    (ErrorCode::E2002, include_str!("E2002.md")),
    (ErrorCode::E2003, include_str!("E2003.md")),
    (ErrorCode::E2004, include_str!("E2004.md")),
    // Warnings (W1xxx)
    (ErrorCode::W1001, include_str!("W1001.md")),
    (ErrorCode::W1002, include_str!("W1002.md")),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_start_with_their_code() {
        for code in ErrorDocs::all_codes() {
            let doc = ErrorDocs::get(code).unwrap_or_default();
            assert!(
                doc.starts_with(&format!("# {}", code.as_str())),
                "doc for {code} has the wrong heading"
            );
        }
    }

    #[test]
    fn every_user_facing_code_is_documented() {
        for code in ErrorCode::ALL {
            if *code == ErrorCode::E9001 {
                assert!(!ErrorDocs::has_docs(*code));
            } else {
                assert!(ErrorDocs::has_docs(*code), "{code} is undocumented");
            }
        }
    }
}
