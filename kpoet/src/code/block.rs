use std::fmt;

use super::{Arg, format};
use crate::{
    error::{Error, Result},
    render::CodeWriter,
    types::TypeName,
};

/// One piece of a [`CodeBlock`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodePart {
    /// Plain text, possibly spanning lines.
    Text(String),
    /// A type reference, resolved against imports when rendered.
    Type(TypeName),
    /// Increase indentation for following lines.
    Indent,
    /// Decrease indentation for following lines.
    Unindent,
}

/// An immutable fragment of Kotlin code.
///
/// Adjacent text is merged on construction, so equal code built through
/// different call sequences compares equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodeBlock {
    parts: Vec<CodePart>,
}

impl CodeBlock {
    /// Create an empty builder.
    pub fn builder() -> CodeBlockBuilder {
        CodeBlockBuilder::default()
    }

    /// Build a block from a single format string.
    pub fn of(format: &str, args: impl IntoIterator<Item = Arg>) -> Result<Self> {
        let mut builder = Self::builder();
        builder.add(format, args)?;
        builder.build()
    }

    /// Get the parts of this block.
    pub fn parts(&self) -> &[CodePart] {
        &self.parts
    }

    /// Check if the block has no content.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Get the content as plain text if it references no types.
    pub fn as_plain_text(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [] => Some(""),
            [CodePart::Text(text)] => Some(text),
            _ => None,
        }
    }

    /// Create a builder pre-filled with this block.
    pub fn to_builder(&self) -> CodeBlockBuilder {
        let mut builder = Self::builder();
        builder.add_code(self);
        builder
    }
}

impl fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = CodeWriter::standalone(Default::default());
        writer.emit_code(self);
        f.write_str(&writer.finish())
    }
}

/// Builder for [`CodeBlock`].
///
/// Fallible methods parse their format before touching the buffer, so a
/// failed call leaves the builder unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlockBuilder {
    parts: Vec<CodePart>,
    open_flows: usize,
}

impl CodeBlockBuilder {
    /// Append formatted code without a trailing newline.
    pub fn add(&mut self, format: &str, args: impl IntoIterator<Item = Arg>) -> Result<&mut Self> {
        let parts = format::parse(format, args.into_iter().collect())?;
        self.extend(parts);
        Ok(self)
    }

    /// Append formatted code followed by a newline.
    pub fn add_statement(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        let parts = format::parse(format, args.into_iter().collect())?;
        self.extend(parts);
        self.push_text("\n");
        Ok(self)
    }

    /// Append a `// comment` line.
    pub fn add_comment(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        let parts = format::parse(format, args.into_iter().collect())?;
        self.push_text("// ");
        self.extend(parts);
        self.push_text("\n");
        Ok(self)
    }

    /// Append a pre-built block.
    pub fn add_code(&mut self, code: &CodeBlock) -> &mut Self {
        self.extend(code.parts.iter().cloned());
        self
    }

    /// Open a control flow: `header {` followed by an indent.
    pub fn begin_control_flow(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        let parts = format::parse(format, args.into_iter().collect())?;
        self.extend(parts);
        self.push_text(" {\n");
        self.parts.push(CodePart::Indent);
        self.open_flows += 1;
        Ok(self)
    }

    /// Continue the innermost control flow: `} header {`.
    pub fn next_control_flow(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        if self.open_flows == 0 {
            return Err(Error::unbalanced_flow(
                "next_control_flow called without an open control flow",
            ));
        }
        let parts = format::parse(format, args.into_iter().collect())?;
        self.parts.push(CodePart::Unindent);
        self.push_text("} ");
        self.extend(parts);
        self.push_text(" {\n");
        self.parts.push(CodePart::Indent);
        Ok(self)
    }

    /// Close the innermost control flow.
    pub fn end_control_flow(&mut self) -> Result<&mut Self> {
        if self.open_flows == 0 {
            return Err(Error::unbalanced_flow(
                "end_control_flow called without an open control flow",
            ));
        }
        self.parts.push(CodePart::Unindent);
        self.push_text("}\n");
        self.open_flows -= 1;
        Ok(self)
    }

    /// Increase indentation.
    pub fn indent(&mut self) -> &mut Self {
        self.parts.push(CodePart::Indent);
        self
    }

    /// Decrease indentation.
    pub fn unindent(&mut self) -> &mut Self {
        self.parts.push(CodePart::Unindent);
        self
    }

    /// Number of control flows not yet closed.
    pub fn open_flows(&self) -> usize {
        self.open_flows
    }

    /// Check if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Remove all content.
    pub fn clear(&mut self) -> &mut Self {
        self.parts.clear();
        self.open_flows = 0;
        self
    }

    /// Finish the block, rejecting unclosed control flows.
    pub fn build(self) -> Result<CodeBlock> {
        if self.open_flows > 0 {
            return Err(Error::unbalanced_flow(format!(
                "{} control flow(s) still open",
                self.open_flows
            )));
        }
        Ok(CodeBlock { parts: self.parts })
    }

    fn push_text(&mut self, text: &str) {
        self.extend([CodePart::Text(text.to_string())]);
    }

    fn extend(&mut self, parts: impl IntoIterator<Item = CodePart>) {
        for part in parts {
            if let CodePart::Text(text) = &part {
                if text.is_empty() {
                    continue;
                }
                if let Some(CodePart::Text(last)) = self.parts.last_mut() {
                    last.push_str(text);
                    continue;
                }
            }
            self.parts.push(part);
        }
    }
}
