//! The `explain` command: display documentation for diagnostic codes.

use std::io::Write;

use rel_diagnostic::{ErrorCode, ErrorDocs};

use crate::DriverError;

/// Write the documentation for `code_str` to `out`.
pub fn explain_error(code_str: &str, out: &mut dyn Write) -> Result<(), DriverError> {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        return Err(DriverError::UnknownCode(code_str.to_string()));
    };

    match ErrorDocs::get(code) {
        Some(doc) => {
            let _ = writeln!(out, "{doc}");
            Ok(())
        }
        None => Err(DriverError::Undocumented(code)),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn prints_known_code() {
        let mut out = Vec::new();
        explain_error("E1002", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# E1002"));
    }

    #[test]
    fn rejects_unknown_and_undocumented_codes() {
        let mut out = Vec::<u8>::new();
        assert!(matches!(
            explain_error("E0000", &mut out),
            Err(DriverError::UnknownCode(code)) if code == "E0000"
        ));
        assert!(matches!(
            explain_error("E9001", &mut out),
            Err(DriverError::Undocumented(ErrorCode::E9001))
        ));
        assert!(out.is_empty());
    }
}
