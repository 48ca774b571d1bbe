//! Entry points that open a top-level scope and return the built spec.

use kpoet::{
    AnnotationSpec, CodeBlock, FileSpec, FunSpec, ParameterSpec, PropertySpec, Result,
    TypeAliasSpec, TypeName, TypeSpec,
};

use crate::scope::{
    AnnotationScope, CodeBlockScope, FileScope, FunScope, ParameterScope, PropertyScope,
    TypeAliasScope, TypeScope, run,
};

pub fn build_code_block<F>(configure: F) -> Result<CodeBlock>
where
    F: FnOnce(&mut CodeBlockScope) -> Result<()>,
{
    run(CodeBlockScope::new(), configure)
}

pub fn build_annotation<F>(type_name: impl Into<TypeName>, configure: F) -> Result<AnnotationSpec>
where
    F: FnOnce(&mut AnnotationScope) -> Result<()>,
{
    run(AnnotationScope::new(AnnotationSpec::builder(type_name)), configure)
}

pub fn build_parameter<F>(
    name: impl Into<String>,
    type_name: impl Into<TypeName>,
    configure: F,
) -> Result<ParameterSpec>
where
    F: FnOnce(&mut ParameterScope) -> Result<()>,
{
    run(ParameterScope::new(ParameterSpec::builder(name, type_name)), configure)
}

pub fn build_property<F>(
    name: impl Into<String>,
    type_name: impl Into<TypeName>,
    configure: F,
) -> Result<PropertySpec>
where
    F: FnOnce(&mut PropertyScope) -> Result<()>,
{
    run(PropertyScope::new(PropertySpec::builder(name, type_name)), configure)
}

pub fn build_fun<F>(name: impl Into<String>, configure: F) -> Result<FunSpec>
where
    F: FnOnce(&mut FunScope) -> Result<()>,
{
    run(FunScope::new(FunSpec::builder(name)), configure)
}

pub fn build_constructor<F>(configure: F) -> Result<FunSpec>
where
    F: FnOnce(&mut FunScope) -> Result<()>,
{
    run(FunScope::new(FunSpec::constructor_builder()), configure)
}

pub fn build_class<F>(name: impl Into<String>, configure: F) -> Result<TypeSpec>
where
    F: FnOnce(&mut TypeScope) -> Result<()>,
{
    run(TypeScope::new(TypeSpec::class_builder(name)), configure)
}

pub fn build_interface<F>(name: impl Into<String>, configure: F) -> Result<TypeSpec>
where
    F: FnOnce(&mut TypeScope) -> Result<()>,
{
    run(TypeScope::new(TypeSpec::interface_builder(name)), configure)
}

pub fn build_object<F>(name: impl Into<String>, configure: F) -> Result<TypeSpec>
where
    F: FnOnce(&mut TypeScope) -> Result<()>,
{
    run(TypeScope::new(TypeSpec::object_builder(name)), configure)
}

pub fn build_enum<F>(name: impl Into<String>, configure: F) -> Result<TypeSpec>
where
    F: FnOnce(&mut TypeScope) -> Result<()>,
{
    run(TypeScope::new(TypeSpec::enum_builder(name)), configure)
}

pub fn build_annotation_class<F>(name: impl Into<String>, configure: F) -> Result<TypeSpec>
where
    F: FnOnce(&mut TypeScope) -> Result<()>,
{
    run(TypeScope::new(TypeSpec::annotation_builder(name)), configure)
}

pub fn build_type_alias<F>(
    name: impl Into<String>,
    type_name: impl Into<TypeName>,
    configure: F,
) -> Result<TypeAliasSpec>
where
    F: FnOnce(&mut TypeAliasScope) -> Result<()>,
{
    run(TypeAliasScope::new(TypeAliasSpec::builder(name, type_name)), configure)
}

/// Build a file in `package` named `name`.
pub fn build_file<F>(
    package: impl Into<String>,
    name: impl Into<String>,
    configure: F,
) -> Result<FileSpec>
where
    F: FnOnce(&mut FileScope) -> Result<()>,
{
    run(FileScope::new(FileSpec::builder(package, name)), configure)
}
