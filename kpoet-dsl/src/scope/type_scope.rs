use std::ops::AddAssign;

use kpoet::{
    AnnotationSpec, Arg, FunSpec, KModifier, PropertySpec, Result, TypeName, TypeSpec,
    TypeSpecBuilder, TypeVariable,
};

use super::{BuilderScope, CodeBlockScope, CodeView, FunScope, run};
use crate::collection::{SpecList, SpecMap};

/// Scope configuring a [`TypeSpec`]: classes, interfaces, objects, enums,
/// annotation classes and anonymous bodies.
#[derive(Debug)]
pub struct TypeScope {
    builder: TypeSpecBuilder,
}

impl TypeScope {
    pub fn new(builder: TypeSpecBuilder) -> Self {
        Self { builder }
    }

    pub fn add_modifier(&mut self, modifier: KModifier) -> &mut Self {
        self.builder.add_modifier(modifier);
        self
    }

    pub fn add_modifiers(&mut self, modifiers: impl IntoIterator<Item = KModifier>) -> &mut Self {
        self.builder.add_modifiers(modifiers);
        self
    }

    pub fn type_variable(&mut self, var: TypeVariable) -> &mut Self {
        self.builder.add_type_variable(var);
        self
    }

    /// Configure the primary constructor. Calling again replaces it.
    pub fn primary_constructor<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut FunScope) -> Result<()>,
    {
        let constructor = run(FunScope::new(FunSpec::constructor_builder()), configure)?;
        self.builder.primary_constructor(constructor);
        Ok(self)
    }

    pub fn superclass(&mut self, superclass: impl Into<TypeName>) -> &mut Self {
        self.builder.superclass(superclass);
        self
    }

    /// Pass an argument to the superclass constructor, or to the enum
    /// constructor inside an enum constant body.
    pub fn superclass_constructor_parameter(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.builder.add_superclass_constructor_parameter(format, args)?;
        Ok(self)
    }

    pub fn superinterface(&mut self, interface: impl Into<TypeName>) -> &mut Self {
        self.builder.add_superinterface(interface);
        self
    }

    /// Implement `interface` by delegating to an expression.
    pub fn superinterface_delegate(
        &mut self,
        interface: impl Into<TypeName>,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.builder.add_superinterface_delegate(interface, format, args)?;
        Ok(self)
    }

    pub fn annotations(&mut self) -> SpecList<'_, AnnotationSpec> {
        SpecList::new(self.builder.annotations_mut())
    }

    pub fn kdoc(&mut self) -> CodeView<'_> {
        CodeView::new(self.builder.kdoc_mut())
    }

    /// The properties, keyed by name.
    pub fn properties(&mut self) -> SpecMap<'_, PropertySpec> {
        SpecMap::new(self.builder.properties_mut())
    }

    /// Functions and secondary constructors, in declaration order.
    pub fn funs(&mut self) -> SpecList<'_, FunSpec> {
        SpecList::new(self.builder.funs_mut())
    }

    /// Nested types, in declaration order.
    pub fn types(&mut self) -> SpecList<'_, TypeSpec> {
        SpecList::new(self.builder.types_mut())
    }

    /// Enum constants keyed by constant name, each with an anonymous body.
    pub fn enum_constants(&mut self) -> SpecMap<'_, TypeSpec> {
        SpecMap::new(self.builder.enum_constants_mut())
    }

    /// Add an `init { ... }` block.
    pub fn init_block<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut CodeBlockScope) -> Result<()>,
    {
        let block = run(CodeBlockScope::new(), configure)?;
        self.builder.add_init_block(block);
        Ok(self)
    }

    pub fn builder_mut(&mut self) -> &mut TypeSpecBuilder {
        &mut self.builder
    }
}

impl BuilderScope for TypeScope {
    type Spec = TypeSpec;
    const KIND: &'static str = "type";

    fn spec_name(&self) -> Option<&str> {
        self.builder.name()
    }

    fn finish(self) -> Result<TypeSpec> {
        self.builder.build()
    }
}

impl AddAssign<FunSpec> for TypeScope {
    fn add_assign(&mut self, fun: FunSpec) {
        self.builder.add_fun(fun);
    }
}

impl AddAssign<PropertySpec> for TypeScope {
    fn add_assign(&mut self, property: PropertySpec) {
        self.builder.add_property(property);
    }
}

impl AddAssign<TypeSpec> for TypeScope {
    fn add_assign(&mut self, ty: TypeSpec) {
        self.builder.add_type(ty);
    }
}

impl AddAssign<AnnotationSpec> for TypeScope {
    fn add_assign(&mut self, annotation: AnnotationSpec) {
        self.builder.add_annotation(annotation);
    }
}
