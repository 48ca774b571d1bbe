//! Function and constructor parameters.

use std::fmt;

use crate::{
    code::{Arg, CodeBlock, CodeBlockBuilder, escape_name},
    error::{Result, check_name},
    render::CodeWriter,
    spec::AnnotationSpec,
    types::{KModifier, Modifiers, TypeName, insert_modifier},
};

/// A parameter such as `vararg wheels: Int = 4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSpec {
    name: String,
    type_name: TypeName,
    modifiers: Modifiers,
    annotations: Vec<AnnotationSpec>,
    default_value: Option<CodeBlock>,
    kdoc: CodeBlock,
}

impl ParameterSpec {
    /// Create a builder.
    pub fn builder(
        name: impl Into<String>,
        type_name: impl Into<TypeName>,
    ) -> ParameterSpecBuilder {
        ParameterSpecBuilder {
            name: name.into(),
            type_name: type_name.into(),
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            default_value: None,
            kdoc: CodeBlock::builder(),
        }
    }

    /// Create a plain parameter.
    pub fn new(name: impl Into<String>, type_name: impl Into<TypeName>) -> Result<Self> {
        Self::builder(name, type_name).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn annotations(&self) -> &[AnnotationSpec] {
        &self.annotations
    }

    pub fn default_value(&self) -> Option<&CodeBlock> {
        self.default_value.as_ref()
    }

    pub fn kdoc(&self) -> &CodeBlock {
        &self.kdoc
    }

    /// Create a builder pre-filled with this parameter.
    pub fn to_builder(&self) -> ParameterSpecBuilder {
        ParameterSpecBuilder {
            name: self.name.clone(),
            type_name: self.type_name.clone(),
            modifiers: self.modifiers.clone(),
            annotations: self.annotations.clone(),
            default_value: self.default_value.clone(),
            kdoc: self.kdoc.to_builder(),
        }
    }

    pub(crate) fn emit(&self, w: &mut CodeWriter) {
        w.emit_annotations(&self.annotations, true);
        w.emit_modifiers(&self.modifiers);
        w.text(&escape_name(&self.name)).text(": ");
        w.emit_type(&self.type_name);
        if let Some(default) = &self.default_value {
            w.text(" = ").emit_code(default);
        }
    }
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = CodeWriter::standalone(Default::default());
        self.emit(&mut writer);
        f.write_str(&writer.finish())
    }
}

impl From<&ParameterSpec> for Arg {
    fn from(value: &ParameterSpec) -> Self {
        Arg::Text(value.name.clone())
    }
}

/// Builder for [`ParameterSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpecBuilder {
    name: String,
    type_name: TypeName,
    modifiers: Modifiers,
    annotations: Vec<AnnotationSpec>,
    default_value: Option<CodeBlock>,
    kdoc: CodeBlockBuilder,
}

impl ParameterSpecBuilder {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the parameter type.
    pub fn type_name(&mut self, type_name: impl Into<TypeName>) -> &mut Self {
        self.type_name = type_name.into();
        self
    }

    pub fn add_modifier(&mut self, modifier: KModifier) -> &mut Self {
        insert_modifier(&mut self.modifiers, modifier);
        self
    }

    pub fn add_modifiers(&mut self, modifiers: impl IntoIterator<Item = KModifier>) -> &mut Self {
        for modifier in modifiers {
            self.add_modifier(modifier);
        }
        self
    }

    pub fn add_annotation(&mut self, annotation: AnnotationSpec) -> &mut Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<AnnotationSpec> {
        &mut self.annotations
    }

    /// Set the default value.
    pub fn default_value(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.default_value = Some(CodeBlock::of(format, args)?);
        Ok(self)
    }

    /// Set a pre-built default value.
    pub fn default_value_code(&mut self, code: CodeBlock) -> &mut Self {
        self.default_value = Some(code);
        self
    }

    /// Append to the documentation, rendered as `@param` on the owner.
    pub fn add_kdoc(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.kdoc.add(format, args)?;
        Ok(self)
    }

    pub fn kdoc_mut(&mut self) -> &mut CodeBlockBuilder {
        &mut self.kdoc
    }

    pub fn build(self) -> Result<ParameterSpec> {
        check_name(&self.name, "parameter")?;
        Ok(ParameterSpec {
            name: self.name,
            type_name: self.type_name,
            modifiers: self.modifiers,
            annotations: self.annotations,
            default_value: self.default_value,
            kdoc: self.kdoc.build()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, types::ClassName};

    #[test]
    fn test_plain_parameter() {
        let param = ParameterSpec::new("name", TypeName::string()).unwrap();
        assert_eq!(param.to_string(), "name: String");
    }

    #[test]
    fn test_full_parameter() {
        let mut builder = ParameterSpec::builder("wheels", TypeName::int());
        builder
            .add_modifier(KModifier::Vararg)
            .add_annotation(AnnotationSpec::of(ClassName::new("kotlin.jvm", "JvmStatic")))
            .default_value("%L", args![4])
            .unwrap();
        let param = builder.build().unwrap();

        assert_eq!(param.to_string(), "@kotlin.jvm.JvmStatic vararg wheels: Int = 4");
    }

    #[test]
    fn test_keyword_name_is_escaped() {
        let param = ParameterSpec::new("in", TypeName::string()).unwrap();
        assert_eq!(param.to_string(), "`in`: String");
    }

    #[test]
    fn test_default_value_last_write_wins() {
        let mut builder = ParameterSpec::builder("speed", TypeName::int());
        builder.default_value("%L", args![1]).unwrap();
        builder.default_value("%L", args![2]).unwrap();
        assert_eq!(builder.build().unwrap().to_string(), "speed: Int = 2");
    }

    #[test]
    fn test_invalid_name() {
        assert!(ParameterSpec::new("", TypeName::int()).is_err());
    }
}
