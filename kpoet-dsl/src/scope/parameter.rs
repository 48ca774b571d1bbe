use std::ops::AddAssign;

use kpoet::{
    AnnotationSpec, Arg, CodeBlock, KModifier, ParameterSpec, ParameterSpecBuilder, Result,
    TypeName,
};

use super::{BuilderScope, CodeView};
use crate::collection::SpecList;

/// Scope configuring a [`ParameterSpec`].
#[derive(Debug)]
pub struct ParameterScope {
    builder: ParameterSpecBuilder,
}

impl ParameterScope {
    pub fn new(builder: ParameterSpecBuilder) -> Self {
        Self { builder }
    }

    pub fn type_name(&mut self, type_name: impl Into<TypeName>) -> &mut Self {
        self.builder.type_name(type_name);
        self
    }

    pub fn add_modifier(&mut self, modifier: KModifier) -> &mut Self {
        self.builder.add_modifier(modifier);
        self
    }

    pub fn add_modifiers(&mut self, modifiers: impl IntoIterator<Item = KModifier>) -> &mut Self {
        self.builder.add_modifiers(modifiers);
        self
    }

    /// Set the default value. Calling again replaces it.
    pub fn default_value(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.builder.default_value(format, args)?;
        Ok(self)
    }

    pub fn default_value_code(&mut self, code: CodeBlock) -> &mut Self {
        self.builder.default_value_code(code);
        self
    }

    pub fn annotations(&mut self) -> SpecList<'_, AnnotationSpec> {
        SpecList::new(self.builder.annotations_mut())
    }

    /// Documentation merged into the enclosing function's `@param` tags.
    pub fn kdoc(&mut self) -> CodeView<'_> {
        CodeView::new(self.builder.kdoc_mut())
    }

    pub fn builder_mut(&mut self) -> &mut ParameterSpecBuilder {
        &mut self.builder
    }
}

impl BuilderScope for ParameterScope {
    type Spec = ParameterSpec;
    const KIND: &'static str = "parameter";

    fn spec_name(&self) -> Option<&str> {
        Some(self.builder.name())
    }

    fn finish(self) -> Result<ParameterSpec> {
        self.builder.build()
    }
}

impl AddAssign<AnnotationSpec> for ParameterScope {
    fn add_assign(&mut self, annotation: AnnotationSpec) {
        self.builder.add_annotation(annotation);
    }
}
