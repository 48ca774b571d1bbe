use indexmap::IndexSet;

use super::ImportTable;
use crate::{
    builder::{CodeBuilder, Indent},
    code::{CodeBlock, CodePart},
    spec::AnnotationSpec,
    types::{ClassName, Modifiers, TypeName, TypeVariable},
};

#[derive(Debug)]
enum Names {
    /// Default imports by simple name, everything else fully qualified.
    Standalone,
    /// First pass over a file: record every referenced top-level class.
    Collect(IndexSet<ClassName>),
    /// Second pass over a file: resolve through the import table.
    Resolve(ImportTable),
}

/// Renders specs to Kotlin text.
#[derive(Debug)]
pub struct CodeWriter {
    out: CodeBuilder,
    names: Names,
}

impl CodeWriter {
    /// Create a writer that resolves types without a file context.
    pub fn standalone(indent: Indent) -> Self {
        Self {
            out: CodeBuilder::new(indent),
            names: Names::Standalone,
        }
    }

    pub(crate) fn collecting(indent: Indent) -> Self {
        Self {
            out: CodeBuilder::new(indent),
            names: Names::Collect(IndexSet::new()),
        }
    }

    pub(crate) fn resolving(indent: Indent, table: ImportTable) -> Self {
        Self {
            out: CodeBuilder::new(indent),
            names: Names::Resolve(table),
        }
    }

    /// Classes recorded by a collecting writer.
    pub(crate) fn into_referenced(self) -> IndexSet<ClassName> {
        match self.names {
            Names::Collect(classes) => classes,
            _ => IndexSet::new(),
        }
    }

    /// Consume the writer and return the rendered text.
    pub fn finish(self) -> String {
        self.out.build()
    }

    /// Write text, indenting new lines.
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.out.push_text(s);
        self
    }

    /// Write a full line.
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.out.push_line(s);
        self
    }

    /// End the current line.
    pub fn newline(&mut self) -> &mut Self {
        self.out.push_newline();
        self
    }

    /// Write a blank line, closing the current line first if needed.
    pub fn blank(&mut self) -> &mut Self {
        self.out.push_blank();
        self
    }

    /// Increase indentation.
    pub fn indent(&mut self) -> &mut Self {
        self.out.push_indent();
        self
    }

    /// Decrease indentation.
    pub fn dedent(&mut self) -> &mut Self {
        self.out.push_dedent();
        self
    }

    /// Write a code block.
    pub fn emit_code(&mut self, code: &CodeBlock) -> &mut Self {
        for part in code.parts() {
            match part {
                CodePart::Text(text) => {
                    self.out.push_text(text);
                }
                CodePart::Type(ty) => {
                    self.emit_type(ty);
                }
                CodePart::Indent => {
                    self.out.push_indent();
                }
                CodePart::Unindent => {
                    self.out.push_dedent();
                }
            }
        }
        self
    }

    /// Render a code block to a string using this writer's type resolution.
    pub fn render_inline(&mut self, code: &CodeBlock) -> String {
        let indent = self.out.indent_style();
        let previous = std::mem::replace(&mut self.out, CodeBuilder::new(indent));
        self.emit_code(code);
        std::mem::replace(&mut self.out, previous).build()
    }

    /// Write a type reference.
    pub fn emit_type(&mut self, ty: &TypeName) -> &mut Self {
        match ty {
            TypeName::Class(class) => {
                self.emit_class(class);
                self.nullable_mark(class.is_nullable());
            }
            TypeName::Parameterized {
                raw,
                args,
                nullable,
            } => {
                self.emit_class(raw);
                self.out.push_text("<");
                self.emit_type_list(args);
                self.out.push_text(">");
                self.nullable_mark(*nullable);
            }
            TypeName::Variable(var) => {
                self.out.push_text(&var.name);
                self.nullable_mark(var.nullable);
            }
            TypeName::Star => {
                self.out.push_text("*");
            }
            TypeName::Wildcard { variance, bound } => {
                self.out.push_text(variance.keyword());
                self.out.push_text(" ");
                self.emit_type(bound);
            }
            TypeName::Lambda {
                receiver,
                params,
                returns,
                nullable,
            } => {
                if *nullable {
                    self.out.push_text("(");
                }
                if let Some(receiver) = receiver {
                    self.emit_type(receiver);
                    self.out.push_text(".");
                }
                self.out.push_text("(");
                self.emit_type_list(params);
                self.out.push_text(") -> ");
                self.emit_type(returns);
                if *nullable {
                    self.out.push_text(")?");
                }
            }
        }
        self
    }

    fn emit_type_list(&mut self, types: &[TypeName]) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                self.out.push_text(", ");
            }
            self.emit_type(ty);
        }
    }

    fn emit_class(&mut self, class: &ClassName) {
        let name = match &mut self.names {
            Names::Standalone if class.is_default_import() => class.simple_names().join("."),
            Names::Standalone => class.canonical_name(),
            Names::Collect(classes) => {
                classes.insert(class.top_level());
                class.canonical_name()
            }
            Names::Resolve(table) => table.resolve(class),
        };
        self.out.push_text(&name);
    }

    fn nullable_mark(&mut self, nullable: bool) {
        if nullable {
            self.out.push_text("?");
        }
    }

    /// Write a KDoc block if `kdoc` is not empty.
    pub(crate) fn emit_kdoc(&mut self, kdoc: &CodeBlock) {
        if kdoc.is_empty() {
            return;
        }
        let text = self.render_inline(kdoc);
        self.emit_kdoc_text(&text);
    }

    /// Write already rendered KDoc text, skipping empty text.
    pub(crate) fn emit_kdoc_text(&mut self, text: &str) {
        if !text.trim().is_empty() {
            self.out.push_kdoc(text);
        }
    }

    /// Whether the next write starts a fresh line.
    pub(crate) fn at_line_start(&self) -> bool {
        self.out.at_line_start()
    }

    /// Write modifiers, each followed by a space.
    pub(crate) fn emit_modifiers(&mut self, modifiers: &Modifiers) {
        for modifier in modifiers {
            self.out.push_text(modifier.keyword());
            self.out.push_text(" ");
        }
    }

    /// Write annotations, either on one line followed by a space or one per line.
    pub(crate) fn emit_annotations(&mut self, annotations: &[AnnotationSpec], inline: bool) {
        for annotation in annotations {
            annotation.emit(self);
            if inline {
                self.out.push_text(" ");
            } else {
                self.out.push_newline();
            }
        }
    }

    /// Write `<A, out B : Bound>`; variables with several bounds keep only
    /// their name here and are completed by [`Self::emit_where_clause`].
    pub(crate) fn emit_type_variables(&mut self, vars: &[TypeVariable]) {
        if vars.is_empty() {
            return;
        }
        self.out.push_text("<");
        for (i, var) in vars.iter().enumerate() {
            if i > 0 {
                self.out.push_text(", ");
            }
            if var.reified {
                self.out.push_text("reified ");
            }
            if let Some(variance) = var.variance {
                self.out.push_text(variance.keyword());
                self.out.push_text(" ");
            }
            self.out.push_text(&var.name);
            if let [bound] = var.bounds.as_slice() {
                self.out.push_text(" : ");
                self.emit_type(bound);
            }
        }
        self.out.push_text(">");
    }

    /// Write ` where T : A, T : B` for variables with more than one bound.
    pub(crate) fn emit_where_clause(&mut self, vars: &[TypeVariable]) {
        let mut first = true;
        for var in vars.iter().filter(|v| v.bounds.len() > 1) {
            for bound in &var.bounds {
                self.out.push_text(if first { " where " } else { ", " });
                first = false;
                self.out.push_text(&var.name);
                self.out.push_text(" : ");
                self.emit_type(bound);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, types::Variance};

    #[test]
    fn test_standalone_resolution() {
        let mut writer = CodeWriter::standalone(Indent::KOTLIN);
        writer
            .emit_type(&TypeName::list(TypeName::class("com.example", "Car")))
            .text(" ")
            .emit_type(&TypeName::class("kotlin.text", "Regex"));
        assert_eq!(writer.finish(), "List<com.example.Car> Regex");
    }

    #[test]
    fn test_collecting_records_top_level_classes() {
        let entry = ClassName::new("java.util", "Map").nested("Entry");
        let mut writer = CodeWriter::collecting(Indent::KOTLIN);
        writer.emit_type(&TypeName::from(&entry));
        writer.emit_type(&TypeName::int());

        let referenced = writer.into_referenced();
        assert_eq!(
            referenced.into_iter().collect::<Vec<_>>(),
            [
                ClassName::new("java.util", "Map"),
                ClassName::new("kotlin", "Int")
            ]
        );
    }

    #[test]
    fn test_render_inline_keeps_buffer() {
        let mut writer = CodeWriter::standalone(Indent::KOTLIN);
        writer.text("before ");
        let code = CodeBlock::of("%T", args![TypeName::string()]).unwrap();
        assert_eq!(writer.render_inline(&code), "String");
        writer.text("after");
        assert_eq!(writer.finish(), "before after");
    }

    #[test]
    fn test_type_variables_and_where_clause() {
        let vars = [
            TypeVariable::new("T").bound(TypeName::class("kotlin", "Comparable")),
            TypeVariable::new("R").variance(Variance::Out),
            TypeVariable::new("E")
                .bound(TypeName::class("kotlin", "CharSequence"))
                .bound(TypeName::class("kotlin", "Comparable")),
        ];
        let mut writer = CodeWriter::standalone(Indent::KOTLIN);
        writer.emit_type_variables(&vars);
        writer.emit_where_clause(&vars);
        assert_eq!(
            writer.finish(),
            "<T : Comparable, out R, E> where E : CharSequence, E : Comparable"
        );
    }

    #[test]
    fn test_kdoc() {
        let mut writer = CodeWriter::standalone(Indent::KOTLIN);
        writer.indent();
        writer.emit_kdoc(&CodeBlock::of("Returns a %T.", args![TypeName::string()]).unwrap());
        assert_eq!(writer.finish(), "  /**\n   * Returns a String.\n   */\n");
    }
}
