//! JSON Emitter
//!
//! Machine-readable diagnostic output in JSON format.

use std::io::Write;

use crate::Diagnostic;

use super::{escape_json, trailing_comma, DiagnosticEmitter};

/// JSON emitter for machine-readable output.
///
/// Produces one array; call [`begin`](Self::begin) before the first
/// diagnostic and [`end`](Self::end) after the last.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter.
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = write!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        if self.first {
            let _ = writeln!(self.writer, "]");
        } else {
            let _ = writeln!(self.writer, "\n]");
        }
    }

    fn write_string_list(&mut self, key: &str, values: &[String], last: bool) {
        let _ = writeln!(self.writer, "    \"{key}\": [");
        for (i, value) in values.iter().enumerate() {
            let comma = trailing_comma(i, values.len());
            let _ = writeln!(self.writer, "      \"{}\"{comma}", escape_json(value));
        }
        let _ = writeln!(self.writer, "    ]{}", if last { "" } else { "," });
    }

    fn write_optional(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                let _ = writeln!(self.writer, "    \"{key}\": \"{}\",", escape_json(v));
            }
            None => {
                let _ = writeln!(self.writer, "    \"{key}\": null,");
            }
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = write!(self.writer, ",");
        }
        self.first = false;

        // Built by hand; the shape is small and fixed.
        let _ = writeln!(self.writer);
        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(
            self.writer,
            "    \"code\": \"{}\",",
            diagnostic.code.as_str()
        );
        let _ = writeln!(
            self.writer,
            "    \"severity\": \"{}\",",
            diagnostic.severity
        );
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(&diagnostic.message)
        );
        self.write_optional("class", diagnostic.class.as_deref());
        self.write_optional("item", diagnostic.item.as_deref());
        self.write_string_list("notes", &diagnostic.notes, false);
        self.write_string_list("suggestions", &diagnostic.suggestions, true);
        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // The array itself is the summary.
    }
}
