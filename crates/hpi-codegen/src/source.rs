//! Indentation-tracking source writer.

/// Line-oriented writer for generated C source.
///
/// Indentation is tracked in levels of four spaces. Dedenting below zero is
/// a generator bug and asserts in debug builds.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buf: String,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given indent level.
    pub fn with_indent(indent: usize) -> Self {
        Self {
            buf: String::new(),
            indent,
        }
    }

    /// Write one indented line.
    pub fn line(&mut self, s: impl AsRef<str>) {
        for _ in 0..self.indent {
            self.buf.push_str("    ");
        }
        self.buf.push_str(s.as_ref());
        self.buf.push('\n');
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Append text verbatim, without indentation or newline.
    pub fn raw(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "lost indent");
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_follow_indent_level() {
        let mut w = SourceWriter::new();
        w.line("if (x) {");
        w.indent();
        w.line("y();");
        w.dedent();
        w.line("}");
        assert_eq!(w.finish(), "if (x) {\n    y();\n}\n");
    }

    #[test]
    fn with_indent_starts_nested() {
        let mut w = SourceWriter::with_indent(2);
        w.line("break;");
        assert_eq!(w.finish(), "        break;\n");
    }
}
