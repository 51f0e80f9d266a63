//! Indentation-aware source buffer.

/// Accumulates emitted source text line by line.
pub(crate) struct SourceWriter {
    /// Current indentation level.
    indent: usize,
    /// Whitespace written once per indentation level.
    unit: String,
    output: String,
}

impl SourceWriter {
    pub(crate) fn new(indent_size: usize) -> Self {
        SourceWriter {
            indent: 0,
            unit: " ".repeat(indent_size),
            output: String::with_capacity(2048),
        }
    }

    /// Increase indentation level.
    pub(crate) fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub(crate) fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write a line to output (with indentation and newline).
    pub(crate) fn writeln(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.output.push_str(&self.unit);
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write an empty line. Never indented, so blank lines carry no
    /// trailing whitespace.
    pub(crate) fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Write `{` and indent.
    pub(crate) fn open_block(&mut self) {
        self.writeln("{");
        self.indent();
    }

    /// Dedent and write `}`.
    pub(crate) fn close_block(&mut self) {
        self.dedent();
        self.writeln("}");
    }

    /// Take the generated output.
    pub(crate) fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
