//! Append-only structured code writer.
//!
//! Every generated artifact routes its text through this writer; semantic
//! decisions (names, types, ordering) are made in the record and plan
//! types, never inline in string splices.

/// A structured text builder with indentation tracking.
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    depth: usize,
}

const INDENT: &str = "    ";

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text without a trailing newline or indentation.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.out.push_str(text);
        self
    }

    /// Append a raw line without indentation.
    pub fn appendln(&mut self, line: &str) -> &mut Self {
        self.out.push_str(line);
        self.out.push('\n');
        self
    }

    /// Append a line prefixed with the current indentation.
    pub fn line(&mut self, line: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.appendln(line)
    }

    /// Append an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Increase the indentation depth.
    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    /// Decrease the indentation depth.
    pub fn outdent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Consume the writer and return the built text.
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_tracks_depth() {
        let mut w = CodeWriter::new();
        w.appendln("class A {");
        w.indent();
        w.line("int x;");
        w.indent();
        w.line("deep;");
        w.outdent();
        w.line("int y;");
        w.outdent();
        w.appendln("}");
        assert_eq!(
            w.finish(),
            "class A {\n    int x;\n        deep;\n    int y;\n}\n"
        );
    }

    #[test]
    fn outdent_saturates_at_zero() {
        let mut w = CodeWriter::new();
        w.outdent();
        w.line("top");
        assert_eq!(w.finish(), "top\n");
    }

    #[test]
    fn append_and_blank() {
        let mut w = CodeWriter::new();
        w.append("a").append("b").blank();
        assert_eq!(w.finish(), "ab\n");
    }
}
