use std::ops::AddAssign;

use kpoet::{
    AnnotationSpec, Arg, CodeBlock, FunSpec, KModifier, PropertySpec, PropertySpecBuilder, Result,
    TypeName, TypeVariable,
};

use super::{BuilderScope, CodeView, FunScope, run};
use crate::collection::SpecList;

/// Scope configuring a [`PropertySpec`].
///
/// Accessors are configured in nested function scopes through
/// [`getter`](Self::getter) and [`setter`](Self::setter).
#[derive(Debug)]
pub struct PropertyScope {
    builder: PropertySpecBuilder,
}

impl PropertyScope {
    pub fn new(builder: PropertySpecBuilder) -> Self {
        Self { builder }
    }

    /// Declare the property as `var` (`true`) or `val` (`false`).
    pub fn mutable(&mut self, mutable: bool) -> &mut Self {
        self.builder.mutable(mutable);
        self
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

    pub fn initializer(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.builder.initializer(format, args)?;
        Ok(self)
    }

    pub fn initializer_code(&mut self, code: CodeBlock) -> &mut Self {
        self.builder.initializer_code(code);
        self
    }

    /// Delegate the property: `val x by lazy { ... }`.
    pub fn delegate(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.builder.delegate(format, args)?;
        Ok(self)
    }

    pub fn delegate_code(&mut self, code: CodeBlock) -> &mut Self {
        self.builder.delegate_code(code);
        self
    }

    /// Make this an extension property on `receiver`.
    pub fn receiver(&mut self, receiver: impl Into<TypeName>) -> &mut Self {
        self.builder.receiver(receiver);
        self
    }

    pub fn type_variable(&mut self, var: TypeVariable) -> &mut Self {
        self.builder.add_type_variable(var);
        self
    }

    pub fn annotations(&mut self) -> SpecList<'_, AnnotationSpec> {
        SpecList::new(self.builder.annotations_mut())
    }

    pub fn kdoc(&mut self) -> CodeView<'_> {
        CodeView::new(self.builder.kdoc_mut())
    }

    /// Configure the `get()` accessor.
    pub fn getter<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut FunScope) -> Result<()>,
    {
        let getter = run(FunScope::new(FunSpec::getter_builder()), configure)?;
        self.builder.getter(getter);
        Ok(self)
    }

    /// Configure the `set(value)` accessor.
    pub fn setter<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut FunScope) -> Result<()>,
    {
        let setter = run(FunScope::new(FunSpec::setter_builder()), configure)?;
        self.builder.setter(setter);
        Ok(self)
    }

    pub fn builder_mut(&mut self) -> &mut PropertySpecBuilder {
        &mut self.builder
    }
}

impl BuilderScope for PropertyScope {
    type Spec = PropertySpec;
    const KIND: &'static str = "property";

    fn spec_name(&self) -> Option<&str> {
        Some(self.builder.name())
    }

    fn finish(self) -> Result<PropertySpec> {
        self.builder.build()
    }
}

impl AddAssign<AnnotationSpec> for PropertyScope {
    fn add_assign(&mut self, annotation: AnnotationSpec) {
        self.builder.add_annotation(annotation);
    }
}
