//! Line buffer that tracks nesting depth.

use super::Indent;

/// Indentation-aware text buffer.
///
/// Indentation is written lazily: a line receives the current indent the
/// first time a non-newline character is pushed to it, so blank lines never
/// carry trailing whitespace.
///
/// # Example
///
/// ```
/// use kpoet::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::kotlin();
/// builder
///     .push_line("fun main() {")
///     .push_indent()
///     .push_line("println(\"Hello\")")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "fun main() {\n  println(\"Hello\")\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
    at_line_start: bool,
}

impl CodeBuilder {
    /// Empty buffer writing `indent` per nesting level.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
            at_line_start: true,
        }
    }

    /// Empty buffer with two-space indentation.
    pub fn kotlin() -> Self {
        Self::new(Indent::KOTLIN)
    }

    /// Push `s` and end the line.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.push_text(s);
        self.push_newline()
    }

    /// Leave exactly one empty line, closing any open line first.
    pub fn push_blank(&mut self) -> &mut Self {
        if !self.at_line_start {
            self.push_newline();
        }
        self.push_newline()
    }

    /// Add text, indenting every line it starts.
    pub fn push_text(&mut self, s: &str) -> &mut Self {
        for (i, segment) in s.split('\n').enumerate() {
            if i > 0 {
                self.push_newline();
            }
            if !segment.is_empty() {
                if self.at_line_start {
                    self.write_indent();
                    self.at_line_start = false;
                }
                self.buffer.push_str(segment);
            }
        }
        self
    }

    /// End the current line.
    pub fn push_newline(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self.at_line_start = true;
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Step out one level; never below zero.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a KDoc comment block, one ` * ` line per input line.
    pub fn push_kdoc(&mut self, text: &str) -> &mut Self {
        self.push_line("/**");
        for line in text.trim_end_matches('\n').split('\n') {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_text(" * ");
                self.push_line(line);
            }
        }
        self.push_line(" */")
    }

    /// Whether the next character starts a fresh line.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    pub fn indent_style(&self) -> Indent {
        self.indent
    }

    pub fn build(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::kotlin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::kotlin();
        builder.push_line("val x = 1");
        assert_eq!(builder.build(), "val x = 1\n");
    }

    #[test]
    fn test_indentation() {
        let mut builder = CodeBuilder::kotlin();
        builder
            .push_line("fun main() {")
            .push_indent()
            .push_line("println(\"Hello\")")
            .push_dedent()
            .push_line("}");

        assert_eq!(builder.build(), "fun main() {\n  println(\"Hello\")\n}\n");
    }

    #[test]
    fn test_text_spanning_lines() {
        let mut builder = CodeBuilder::new(Indent::WIDE);
        builder.push_indent().push_text("a\n\nb").push_newline();
        assert_eq!(builder.build(), "    a\n\n    b\n");
    }

    #[test]
    fn test_text_continues_line() {
        let mut builder = CodeBuilder::kotlin();
        builder.push_indent().push_text("val x").push_text(" = 1").push_newline();
        assert_eq!(builder.build(), "  val x = 1\n");
    }

    #[test]
    fn test_blank_line() {
        let mut builder = CodeBuilder::kotlin();
        builder
            .push_line("import kotlin.io.println")
            .push_blank()
            .push_line("fun main() {}");

        assert_eq!(builder.build(), "import kotlin.io.println\n\nfun main() {}\n");
    }

    #[test]
    fn test_blank_line_closes_open_line() {
        let mut builder = CodeBuilder::kotlin();
        builder.push_text("a").push_blank().push_text("b");
        assert_eq!(builder.build(), "a\n\nb");
    }

    #[test]
    fn test_kdoc() {
        let mut builder = CodeBuilder::kotlin();
        builder.push_kdoc("A car.\n\nDrives.\n");
        assert_eq!(builder.build(), "/**\n * A car.\n *\n * Drives.\n */\n");
    }

    #[test]
    fn test_tab_indent() {
        let mut builder = CodeBuilder::new(Indent::TAB);
        builder.push_indent().push_line("return 1");
        assert_eq!(builder.build(), "\treturn 1\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::kotlin();
        builder.push_dedent().push_line("x");
        assert_eq!(builder.current_indent(), 0);
        assert_eq!(builder.build(), "x\n");
    }
}
