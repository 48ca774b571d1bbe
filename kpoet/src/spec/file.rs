//! Kotlin source files.

use std::fmt;

use tracing::debug;

use crate::{
    code::{Arg, CodeBlock, CodeBlockBuilder, escape_name},
    config::RenderOptions,
    error::{Error, Result, check_name},
    render::{CodeWriter, Import, ImportTable},
    spec::{AnnotationSpec, FunSpec, PropertySpec, TypeAliasSpec, TypeSpec, UseSiteTarget},
    types::ClassName,
};

/// A top-level declaration in a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileMember {
    Type(TypeSpec),
    Fun(FunSpec),
    Property(PropertySpec),
    TypeAlias(TypeAliasSpec),
}

impl FileMember {
    /// Get the declared name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Type(spec) => spec.name(),
            Self::Fun(spec) => Some(spec.name()),
            Self::Property(spec) => Some(spec.name()),
            Self::TypeAlias(spec) => Some(spec.name()),
        }
    }

    fn emit(&self, w: &mut CodeWriter) {
        match self {
            Self::Type(spec) => spec.emit(w),
            Self::Fun(spec) => spec.emit(w, false),
            Self::Property(spec) => spec.emit(w),
            Self::TypeAlias(spec) => spec.emit(w),
        }
    }
}

impl From<TypeSpec> for FileMember {
    fn from(value: TypeSpec) -> Self {
        Self::Type(value)
    }
}

impl From<FunSpec> for FileMember {
    fn from(value: FunSpec) -> Self {
        Self::Fun(value)
    }
}

impl From<PropertySpec> for FileMember {
    fn from(value: PropertySpec) -> Self {
        Self::Property(value)
    }
}

impl From<TypeAliasSpec> for FileMember {
    fn from(value: TypeAliasSpec) -> Self {
        Self::TypeAlias(value)
    }
}

/// A Kotlin file: package, imports and top-level members.
///
/// Imports are derived from the types the members reference. A class is
/// imported when no earlier class claimed its simple name; the others are
/// written fully qualified.
///
/// # Example
///
/// ```
/// use kpoet::{args, spec::{FileSpec, FunSpec}};
///
/// let mut main = FunSpec::builder("main");
/// main.add_statement("println(%S)", args!["Hello"]).unwrap();
///
/// let mut file = FileSpec::builder("com.example", "Main");
/// file.add_fun(main.build().unwrap());
/// assert_eq!(
///     file.build().unwrap().render(),
///     "package com.example\n\nfun main() {\n  println(\"Hello\")\n}\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSpec {
    package: String,
    name: String,
    comment: CodeBlock,
    annotations: Vec<AnnotationSpec>,
    imports: Vec<Import>,
    members: Vec<FileMember>,
}

impl FileSpec {
    pub fn builder(package: impl Into<String>, name: impl Into<String>) -> FileSpecBuilder {
        FileSpecBuilder {
            package: package.into(),
            name: name.into(),
            comment: CodeBlock::builder(),
            annotations: Vec::new(),
            imports: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Create a file holding a single type named after it.
    pub fn get(package: impl Into<String>, spec: TypeSpec) -> Result<Self> {
        let name = spec.name().unwrap_or_default().to_string();
        let mut builder = Self::builder(package, name);
        builder.add_type(spec);
        builder.build()
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &CodeBlock {
        &self.comment
    }

    pub fn annotations(&self) -> &[AnnotationSpec] {
        &self.annotations
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    pub fn members(&self) -> &[FileMember] {
        &self.members
    }

    /// Render with default options.
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    /// Render with the given indentation and header.
    pub fn render_with(&self, options: &RenderOptions) -> String {
        let mut collector = CodeWriter::collecting(options.indent);
        self.emit(&mut collector, None);
        let referenced = collector.into_referenced();

        let table = ImportTable::new(&self.package, &self.imports, &referenced);
        let lines: Vec<String> = table.lines().map(str::to_string).collect();
        let mut writer = CodeWriter::resolving(options.indent, table);
        if let Some(header) = &options.header {
            for line in header.lines() {
                writer.line(&comment_line(line));
            }
            writer.blank();
        }
        self.emit(&mut writer, Some(lines.as_slice()));

        debug!(
            package = %self.package,
            file = %self.name,
            imports = lines.len(),
            members = self.members.len(),
            "rendered file"
        );
        writer.finish()
    }

    fn emit(&self, w: &mut CodeWriter, imports: Option<&[String]>) {
        let mut first = true;
        let mut section = |w: &mut CodeWriter| {
            if !first {
                w.blank();
            }
            first = false;
        };

        if !self.comment.is_empty() {
            section(w);
            let text = w.render_inline(&self.comment);
            for line in text.trim_end_matches('\n').split('\n') {
                w.line(&comment_line(line));
            }
        }

        if !self.annotations.is_empty() {
            section(w);
            w.emit_annotations(&self.annotations, false);
        }

        if !self.package.is_empty() {
            section(w);
            let package: Vec<String> = self.package.split('.').map(escape_name).collect();
            w.line(&format!("package {}", package.join(".")));
        }

        if let Some(imports) = imports.filter(|lines| !lines.is_empty()) {
            section(w);
            for import in imports {
                w.line(import);
            }
        }

        for member in &self.members {
            section(w);
            member.emit(w);
        }
    }
}

fn comment_line(line: &str) -> String {
    if line.is_empty() {
        "//".to_string()
    } else {
        format!("// {}", line)
    }
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Builder for [`FileSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct FileSpecBuilder {
    package: String,
    name: String,
    comment: CodeBlockBuilder,
    annotations: Vec<AnnotationSpec>,
    imports: Vec<Import>,
    members: Vec<FileMember>,
}

impl FileSpecBuilder {
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append to the comment written above the package statement.
    pub fn add_file_comment(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.comment.add(format, args)?;
        Ok(self)
    }

    pub fn comment_mut(&mut self) -> &mut CodeBlockBuilder {
        &mut self.comment
    }

    /// Add a file annotation. The use-site target is always `file`.
    pub fn add_annotation(&mut self, annotation: AnnotationSpec) -> &mut Self {
        self.annotations
            .push(annotation.with_use_site_target(UseSiteTarget::File));
        self
    }

    pub fn add_import(&mut self, import: Import) -> &mut Self {
        self.imports.push(import);
        self
    }

    /// Import `class` under `alias`.
    pub fn add_aliased_import(&mut self, class: &ClassName, alias: impl Into<String>) -> &mut Self {
        self.add_import(Import::aliased(class.canonical_name(), alias))
    }

    pub fn add_member(&mut self, member: impl Into<FileMember>) -> &mut Self {
        self.members.push(member.into());
        self
    }

    pub fn add_type(&mut self, spec: TypeSpec) -> &mut Self {
        self.add_member(spec)
    }

    pub fn add_fun(&mut self, spec: FunSpec) -> &mut Self {
        self.add_member(spec)
    }

    pub fn add_property(&mut self, spec: PropertySpec) -> &mut Self {
        self.add_member(spec)
    }

    pub fn add_type_alias(&mut self, spec: TypeAliasSpec) -> &mut Self {
        self.add_member(spec)
    }

    pub fn members_mut(&mut self) -> &mut Vec<FileMember> {
        &mut self.members
    }

    pub fn build(self) -> Result<FileSpec> {
        check_name(&self.name, "file")?;
        for member in &self.members {
            let illegal = match member {
                FileMember::Fun(fun) if fun.is_constructor() => Some("constructors"),
                FileMember::Fun(fun) if fun.is_accessor() => Some("accessor functions"),
                FileMember::Type(ty) if ty.name().is_none() => Some("unnamed types"),
                _ => None,
            };
            if let Some(member) = illegal {
                return Err(Error::illegal_member("file", &self.name, member));
            }
        }

        Ok(FileSpec {
            package: self.package,
            name: self.name,
            comment: self.comment.build()?,
            annotations: self.annotations,
            imports: self.imports,
            members: self.members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, builder::Indent, types::TypeName};

    fn car() -> ClassName {
        ClassName::new("com.example.model", "Car")
    }

    #[test]
    fn test_imports_referenced_classes() {
        let garage = TypeAliasSpec::builder("Garage", TypeName::list(car().into()))
            .build()
            .unwrap();
        let mut builder = FileSpec::builder("com.example", "Garage");
        builder.add_type_alias(garage);

        assert_eq!(
            builder.build().unwrap().render(),
            "package com.example\n\nimport com.example.model.Car\n\ntypealias Garage = List<Car>\n"
        );
    }

    #[test]
    fn test_conflicting_simple_names_stay_qualified() {
        let other = ClassName::new("com.example.legacy", "Car");
        let mut fun = FunSpec::builder("upgrade");
        fun.add_parameter_of("old", other)
            .unwrap()
            .returns(car());

        let mut builder = FileSpec::builder("com.example", "Upgrade");
        builder.add_fun(fun.build().unwrap());

        assert_eq!(
            builder.build().unwrap().render(),
            "package com.example\n\nimport com.example.legacy.Car\n\nfun upgrade(old: Car): com.example.model.Car {\n}\n"
        );
    }

    #[test]
    fn test_aliased_import() {
        let mut property = PropertySpec::builder("current", car());
        property.initializer("%T()", args![car()]).unwrap();

        let mut builder = FileSpec::builder("com.example", "Current");
        builder
            .add_aliased_import(&car(), "Auto")
            .add_property(property.build().unwrap());

        assert_eq!(
            builder.build().unwrap().render(),
            "package com.example\n\nimport com.example.model.Car as Auto\n\nval current: Auto = Auto()\n"
        );
    }

    #[test]
    fn test_header_comment_and_annotations() {
        let mut jvm_name = AnnotationSpec::builder(ClassName::new("kotlin.jvm", "JvmName"));
        jvm_name.add_member("%S", args!["Cars"]).unwrap();

        let mut builder = FileSpec::builder("com.example", "Cars");
        builder
            .add_file_comment("Cars for sale.", args![])
            .unwrap()
            .add_annotation(jvm_name.build().unwrap())
            .add_property(PropertySpec::new("count", TypeName::int()).unwrap());

        let options = RenderOptions::default()
            .with_indent(Indent::WIDE)
            .with_header("Generated code.");
        assert_eq!(
            builder.build().unwrap().render_with(&options),
            "// Generated code.\n\n// Cars for sale.\n\n@file:JvmName(\"Cars\")\n\npackage com.example\n\nimport kotlin.jvm.JvmName\n\nval count: Int\n"
        );
    }

    #[test]
    fn test_default_package() {
        let mut builder = FileSpec::builder("", "Script");
        builder.add_property(PropertySpec::new("x", TypeName::int()).unwrap());
        assert_eq!(builder.build().unwrap().render(), "val x: Int\n");
    }

    #[test]
    fn test_rejects_constructors() {
        let mut builder = FileSpec::builder("com.example", "Bad");
        builder.add_fun(FunSpec::constructor_builder().build().unwrap());
        assert!(builder.build().is_err());
    }
}
