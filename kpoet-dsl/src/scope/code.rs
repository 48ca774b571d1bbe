use std::ops::AddAssign;

use kpoet::{Arg, CodeBlock, CodeBlockBuilder, Result};
use tracing::trace;

use super::BuilderScope;

/// Text appending for scopes that own a code buffer.
///
/// Every method parses its format before touching the buffer, so a failed
/// call appends nothing.
pub trait CodeAppend: Sized {
    /// The buffer text is appended to.
    fn code_mut(&mut self) -> &mut CodeBlockBuilder;

    /// Append formatted code without a trailing newline.
    fn append(&mut self, format: &str, args: impl IntoIterator<Item = Arg>) -> Result<&mut Self> {
        self.code_mut().add(format, args)?;
        Ok(self)
    }

    /// Append formatted code followed by a newline.
    fn append_line(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.code_mut().add_statement(format, args)?;
        Ok(self)
    }

    /// Append a statement. Equivalent to [`append_line`](Self::append_line).
    fn append_statement(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.append_line(format, args)
    }

    /// Append a `// comment` line.
    fn append_comment(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.code_mut().add_comment(format, args)?;
        Ok(self)
    }

    /// Append a pre-built block.
    fn append_code(&mut self, code: &CodeBlock) -> &mut Self {
        self.code_mut().add_code(code);
        self
    }

    /// Append `header {`, run `configure`, then append the closing `}`.
    ///
    /// The flow is closed even when `configure` fails; its error is returned
    /// after the close.
    fn append_flow<F>(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
        configure: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.code_mut().begin_control_flow(format, args)?;
        let depth = self.code_mut().open_flows();
        trace!(depth, "control flow opened");

        let outcome = configure(self);
        let closed = self.code_mut().end_control_flow().map(|_| ());
        trace!(depth, ok = outcome.is_ok(), "control flow closed");

        outcome?;
        closed?;
        Ok(self)
    }

    /// Continue the enclosing flow: `} header {`. Only valid inside
    /// [`append_flow`](Self::append_flow).
    fn append_next_flow(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.code_mut().next_control_flow(format, args)?;
        Ok(self)
    }

    /// Increase indentation for following lines.
    fn indent(&mut self) -> &mut Self {
        self.code_mut().indent();
        self
    }

    /// Decrease indentation for following lines.
    fn unindent(&mut self) -> &mut Self {
        self.code_mut().unindent();
        self
    }
}

/// Scope building a standalone [`CodeBlock`].
#[derive(Debug, Default)]
pub struct CodeBlockScope {
    code: CodeBlockBuilder,
}

impl CodeBlockScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope that continues `code`.
    pub fn from_builder(code: CodeBlockBuilder) -> Self {
        Self { code }
    }
}

impl CodeAppend for CodeBlockScope {
    fn code_mut(&mut self) -> &mut CodeBlockBuilder {
        &mut self.code
    }
}

impl BuilderScope for CodeBlockScope {
    type Spec = CodeBlock;
    const KIND: &'static str = "code";

    fn spec_name(&self) -> Option<&str> {
        None
    }

    fn finish(self) -> Result<CodeBlock> {
        self.code.build()
    }
}

impl AddAssign<CodeBlock> for CodeBlockScope {
    fn add_assign(&mut self, code: CodeBlock) {
        self.append_code(&code);
    }
}

impl AddAssign<&CodeBlock> for CodeBlockScope {
    fn add_assign(&mut self, code: &CodeBlock) {
        self.append_code(code);
    }
}

/// Code scope borrowing a buffer owned by another scope, such as KDoc or a
/// file comment.
#[derive(Debug)]
pub struct CodeView<'a> {
    code: &'a mut CodeBlockBuilder,
}

impl<'a> CodeView<'a> {
    pub fn new(code: &'a mut CodeBlockBuilder) -> Self {
        Self { code }
    }

    /// Check if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl CodeAppend for CodeView<'_> {
    fn code_mut(&mut self) -> &mut CodeBlockBuilder {
        &mut *self.code
    }
}

impl AddAssign<CodeBlock> for CodeView<'_> {
    fn add_assign(&mut self, code: CodeBlock) {
        self.append_code(&code);
    }
}

#[cfg(test)]
mod tests {
    use kpoet::{Error, TypeName, args};

    use super::*;
    use crate::scope::run;

    fn block(configure: impl FnOnce(&mut CodeBlockScope) -> Result<()>) -> Result<CodeBlock> {
        run(CodeBlockScope::new(), configure)
    }

    #[test]
    fn test_flow_matches_manual_sequencing() {
        let dsl = block(|code| {
            code.append_flow("for (%N in %L)", args!["car", "cars"], |code| {
                code.append_line("car.drive()", args![])?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

        let mut manual = CodeBlock::builder();
        manual
            .begin_control_flow("for (%N in %L)", args!["car", "cars"])
            .unwrap()
            .add_statement("car.drive()", args![])
            .unwrap()
            .end_control_flow()
            .unwrap();

        assert_eq!(dsl, manual.build().unwrap());
        assert_eq!(dsl.to_string(), "for (car in cars) {\n  car.drive()\n}\n");
    }

    #[test]
    fn test_next_flow() {
        let code = block(|code| {
            code.append_flow("if (%N)", args!["fast"], |code| {
                code.append_line("brake()", args![])?
                    .append_next_flow("else", args![])?
                    .append_line("accelerate()", args![])?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
        assert_eq!(
            code.to_string(),
            "if (fast) {\n  brake()\n} else {\n  accelerate()\n}\n"
        );
    }

    #[test]
    fn test_flow_closes_when_nested_block_fails() {
        let mut scope = CodeBlockScope::new();
        let result = scope.append_flow("while (true)", args![], |code| {
            code.append_line("tick()", args![])?;
            code.append_line("%T", args!["not a type"])?;
            Ok(())
        });

        assert!(matches!(*result.unwrap_err(), Error::Format { .. }));
        assert_eq!(scope.code_mut().open_flows(), 0);
        assert_eq!(
            scope.finish().unwrap().to_string(),
            "while (true) {\n  tick()\n}\n"
        );
    }

    #[test]
    fn test_failed_block_is_discarded() {
        let result = block(|code| {
            code.append_line("val a = 1", args![])?;
            code.append("%L %L", args![1])?;
            Ok(())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_append_variants() {
        let inner = CodeBlock::of("%T()", args![TypeName::string()]).unwrap();
        let code = block(|code| {
            code.append_comment("build %L", args!["it"])?
                .append("val s = ", args![])?
                .append_code(&inner)
                .append_statement("", args![])?;
            *code += CodeBlock::of("return s\n", args![])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(code.to_string(), "// build it\nval s = String()\nreturn s\n");
    }

    #[test]
    fn test_code_view_appends_into_borrowed_buffer() {
        let mut buffer = CodeBlock::builder();
        {
            let mut view = CodeView::new(&mut buffer);
            assert!(view.is_empty());
            view.append("Drives the car.", args![]).unwrap();
            view += CodeBlock::of(" Fast.", args![]).unwrap();
        }
        assert_eq!(buffer.build().unwrap().to_string(), "Drives the car. Fast.");
    }
}
