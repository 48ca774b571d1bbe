//! Classes, interfaces, objects, enums and annotation classes.

use std::fmt;

use indexmap::IndexMap;

use super::fun::render_kdoc;
use crate::{
    code::{Arg, CodeBlock, CodeBlockBuilder, escape_name},
    error::{Error, Result, check_name},
    render::CodeWriter,
    spec::{AnnotationSpec, FunKind, FunSpec, PropertySpec, first_duplicate},
    types::{KModifier, Modifiers, TypeName, TypeVariable, insert_modifier},
};

/// The declaration kind of a [`TypeSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Object,
    Companion,
    Enum,
    Annotation,
}

impl TypeKind {
    /// Get the declaration keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::Companion => "companion object",
            Self::Enum => "enum class",
            Self::Annotation => "annotation class",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::Companion => "companion object",
            Self::Enum => "enum",
            Self::Annotation => "annotation class",
        }
    }
}

/// A type declaration.
///
/// Anonymous classes (`object : Runnable { ... }`) and enum constant bodies
/// are type specs without a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSpec {
    kind: TypeKind,
    name: Option<String>,
    kdoc: CodeBlock,
    annotations: Vec<AnnotationSpec>,
    modifiers: Modifiers,
    type_variables: Vec<TypeVariable>,
    primary_constructor: Option<FunSpec>,
    superclass: Option<TypeName>,
    superclass_constructor_params: Vec<CodeBlock>,
    superinterfaces: Vec<(TypeName, Option<CodeBlock>)>,
    enum_constants: Vec<(String, TypeSpec)>,
    properties: Vec<PropertySpec>,
    init_blocks: Vec<CodeBlock>,
    funs: Vec<FunSpec>,
    types: Vec<TypeSpec>,
}

impl TypeSpec {
    pub fn class_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Class, Some(name.into()))
    }

    pub fn interface_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Interface, Some(name.into()))
    }

    pub fn object_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Object, Some(name.into()))
    }

    /// Create a builder for a companion object, optionally named.
    pub fn companion_object_builder(name: Option<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Companion, name)
    }

    pub fn enum_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Enum, Some(name.into()))
    }

    pub fn annotation_builder(name: impl Into<String>) -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Annotation, Some(name.into()))
    }

    /// Create a builder for an anonymous class or enum constant body.
    pub fn anonymous_class_builder() -> TypeSpecBuilder {
        TypeSpecBuilder::new(TypeKind::Class, None)
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Get the name, `None` for anonymous classes and unnamed companions.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none() && self.kind != TypeKind::Companion
    }

    pub fn kdoc(&self) -> &CodeBlock {
        &self.kdoc
    }

    pub fn annotations(&self) -> &[AnnotationSpec] {
        &self.annotations
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn type_variables(&self) -> &[TypeVariable] {
        &self.type_variables
    }

    pub fn primary_constructor(&self) -> Option<&FunSpec> {
        self.primary_constructor.as_ref()
    }

    pub fn superclass(&self) -> Option<&TypeName> {
        self.superclass.as_ref()
    }

    pub fn superclass_constructor_params(&self) -> &[CodeBlock] {
        &self.superclass_constructor_params
    }

    /// Get the implemented interfaces with their optional `by` delegates.
    pub fn superinterfaces(&self) -> &[(TypeName, Option<CodeBlock>)] {
        &self.superinterfaces
    }

    pub fn enum_constants(&self) -> &[(String, TypeSpec)] {
        &self.enum_constants
    }

    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn init_blocks(&self) -> &[CodeBlock] {
        &self.init_blocks
    }

    pub fn funs(&self) -> &[FunSpec] {
        &self.funs
    }

    pub fn types(&self) -> &[TypeSpec] {
        &self.types
    }

    /// Create a builder pre-filled with this type.
    pub fn to_builder(&self) -> TypeSpecBuilder {
        TypeSpecBuilder {
            kind: self.kind,
            name: self.name.clone(),
            kdoc: self.kdoc.to_builder(),
            annotations: self.annotations.clone(),
            modifiers: self.modifiers.clone(),
            type_variables: self.type_variables.clone(),
            primary_constructor: self.primary_constructor.clone(),
            superclass: self.superclass.clone(),
            superclass_constructor_params: self.superclass_constructor_params.clone(),
            superinterfaces: self.superinterfaces.iter().cloned().collect(),
            enum_constants: self.enum_constants.iter().cloned().collect(),
            properties: self
                .properties
                .iter()
                .map(|p| (p.name().to_string(), p.clone()))
                .collect(),
            init_blocks: self.init_blocks.clone(),
            funs: self.funs.clone(),
            types: self.types.clone(),
        }
    }

    pub(crate) fn emit(&self, w: &mut CodeWriter) {
        self.emit_kdoc(w);
        w.emit_annotations(&self.annotations, false);
        w.emit_modifiers(&self.modifiers);
        if self.is_anonymous() {
            w.text("object");
        } else {
            w.text(self.kind.keyword());
        }
        if let Some(name) = &self.name {
            w.text(" ").text(&escape_name(name));
        }
        w.emit_type_variables(&self.type_variables);
        if let Some(constructor) = &self.primary_constructor {
            self.emit_primary_constructor(w, constructor);
        }
        self.emit_supertypes(w);
        w.emit_where_clause(&self.type_variables);

        if self.has_members() || self.is_anonymous() {
            w.text(" {").newline().indent();
            self.emit_members(w);
            w.dedent().text("}");
        }
        w.newline();
    }

    fn emit_enum_constant(&self, w: &mut CodeWriter, name: &str) {
        w.emit_kdoc(&self.kdoc);
        w.emit_annotations(&self.annotations, false);
        w.text(&escape_name(name));
        if !self.superclass_constructor_params.is_empty() {
            w.text("(");
            emit_joined(w, &self.superclass_constructor_params);
            w.text(")");
        }
        if self.has_members() {
            w.text(" {").newline().indent();
            self.emit_members(w);
            w.dedent().text("}");
        }
    }

    fn emit_kdoc(&self, w: &mut CodeWriter) {
        let params = self
            .primary_constructor
            .as_ref()
            .map(FunSpec::parameters)
            .unwrap_or_default();
        let text = render_kdoc(w, &self.kdoc, params);
        w.emit_kdoc_text(&text);
    }

    fn emit_primary_constructor(&self, w: &mut CodeWriter, constructor: &FunSpec) {
        if !constructor.annotations().is_empty() || !constructor.modifiers().is_empty() {
            w.text(" ");
            w.emit_annotations(constructor.annotations(), true);
            w.emit_modifiers(constructor.modifiers());
            w.text("constructor");
        }
        w.text("(");
        for (i, param) in constructor.parameters().iter().enumerate() {
            if i > 0 {
                w.text(", ");
            }
            match self.properties.iter().find(|p| p.is_declared_by(param)) {
                Some(property) => property.emit_in_constructor(w, param),
                None => param.emit(w),
            }
        }
        w.text(")");
    }

    fn emit_supertypes(&self, w: &mut CodeWriter) {
        let mut first = true;
        let mut separator = |w: &mut CodeWriter| {
            w.text(if first { " : " } else { ", " });
            first = false;
        };

        if let Some(superclass) = &self.superclass {
            separator(w);
            w.emit_type(superclass);
            let has_secondary = self.funs.iter().any(FunSpec::is_constructor);
            if !self.superclass_constructor_params.is_empty()
                || self.primary_constructor.is_some()
                || !has_secondary
            {
                w.text("(");
                emit_joined(w, &self.superclass_constructor_params);
                w.text(")");
            }
        }
        for (interface, delegate) in &self.superinterfaces {
            separator(w);
            w.emit_type(interface);
            if let Some(delegate) = delegate {
                w.text(" by ").emit_code(delegate);
            }
        }
    }

    /// Properties not already declared by the primary constructor.
    fn body_properties(&self) -> impl Iterator<Item = &PropertySpec> {
        let params = self
            .primary_constructor
            .as_ref()
            .map(FunSpec::parameters)
            .unwrap_or_default();
        self.properties
            .iter()
            .filter(move |p| !params.iter().any(|param| p.is_declared_by(param)))
    }

    fn constructor_body(&self) -> Option<&CodeBlock> {
        self.primary_constructor
            .as_ref()
            .map(FunSpec::body)
            .filter(|body| !body.is_empty())
    }

    fn has_members(&self) -> bool {
        !self.enum_constants.is_empty() || self.has_non_constant_members()
    }

    fn has_non_constant_members(&self) -> bool {
        self.body_properties().next().is_some()
            || self.constructor_body().is_some()
            || !self.init_blocks.is_empty()
            || !self.funs.is_empty()
            || !self.types.is_empty()
    }

    fn emit_members(&self, w: &mut CodeWriter) {
        let mut first = true;
        let mut separate = |w: &mut CodeWriter| {
            if !first {
                w.blank();
            }
            first = false;
        };

        if !self.enum_constants.is_empty() {
            separate(w);
            let more = self.has_non_constant_members();
            let last = self.enum_constants.len() - 1;
            for (i, (name, constant)) in self.enum_constants.iter().enumerate() {
                constant.emit_enum_constant(w, name);
                if i < last {
                    w.text(",");
                } else if more {
                    w.text(";");
                }
                w.newline();
            }
        }

        for property in self.body_properties() {
            separate(w);
            property.emit(w);
        }

        for block in self.constructor_body().into_iter().chain(&self.init_blocks) {
            separate(w);
            w.text("init {").newline().indent();
            w.emit_code(block);
            if !w.at_line_start() {
                w.newline();
            }
            w.dedent().line("}");
        }

        let in_interface = self.kind == TypeKind::Interface;
        let (constructors, funs): (Vec<&FunSpec>, Vec<&FunSpec>) =
            self.funs.iter().partition(|f| f.is_constructor());
        for fun in constructors.into_iter().chain(funs) {
            separate(w);
            fun.emit(w, in_interface);
        }

        for ty in &self.types {
            separate(w);
            ty.emit(w);
        }
    }
}

fn emit_joined(w: &mut CodeWriter, blocks: &[CodeBlock]) {
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            w.text(", ");
        }
        w.emit_code(block);
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = CodeWriter::standalone(Default::default());
        self.emit(&mut writer);
        f.write_str(&writer.finish())
    }
}

impl From<&TypeSpec> for Arg {
    fn from(value: &TypeSpec) -> Self {
        Arg::Text(value.name.clone().unwrap_or_default())
    }
}

/// Builder for [`TypeSpec`].
///
/// Properties, enum constants and superinterfaces are keyed: re-adding an
/// existing key replaces the earlier entry in place.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpecBuilder {
    kind: TypeKind,
    name: Option<String>,
    kdoc: CodeBlockBuilder,
    annotations: Vec<AnnotationSpec>,
    modifiers: Modifiers,
    type_variables: Vec<TypeVariable>,
    primary_constructor: Option<FunSpec>,
    superclass: Option<TypeName>,
    superclass_constructor_params: Vec<CodeBlock>,
    superinterfaces: IndexMap<TypeName, Option<CodeBlock>>,
    enum_constants: IndexMap<String, TypeSpec>,
    properties: IndexMap<String, PropertySpec>,
    init_blocks: Vec<CodeBlock>,
    funs: Vec<FunSpec>,
    types: Vec<TypeSpec>,
}

impl TypeSpecBuilder {
    fn new(kind: TypeKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            kdoc: CodeBlock::builder(),
            annotations: Vec::new(),
            modifiers: Modifiers::new(),
            type_variables: Vec::new(),
            primary_constructor: None,
            superclass: None,
            superclass_constructor_params: Vec::new(),
            superinterfaces: IndexMap::new(),
            enum_constants: IndexMap::new(),
            properties: IndexMap::new(),
            init_blocks: Vec::new(),
            funs: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

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

    pub fn add_annotation(&mut self, annotation: AnnotationSpec) -> &mut Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<AnnotationSpec> {
        &mut self.annotations
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

    pub fn add_type_variable(&mut self, var: TypeVariable) -> &mut Self {
        self.type_variables.push(var);
        self
    }

    pub fn primary_constructor(&mut self, constructor: FunSpec) -> &mut Self {
        self.primary_constructor = Some(constructor);
        self
    }

    pub fn superclass(&mut self, superclass: impl Into<TypeName>) -> &mut Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Add an argument passed to the superclass constructor, or to the enum
    /// constructor when this builds an enum constant.
    pub fn add_superclass_constructor_parameter(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.superclass_constructor_params
            .push(CodeBlock::of(format, args)?);
        Ok(self)
    }

    pub fn add_superinterface(&mut self, interface: impl Into<TypeName>) -> &mut Self {
        self.superinterfaces.insert(interface.into(), None);
        self
    }

    /// Implement `interface` by delegation: `Interface by delegate`.
    pub fn add_superinterface_delegate(
        &mut self,
        interface: impl Into<TypeName>,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        let delegate = CodeBlock::of(format, args)?;
        self.superinterfaces.insert(interface.into(), Some(delegate));
        Ok(self)
    }

    pub fn add_enum_constant(&mut self, name: impl Into<String>, body: TypeSpec) -> &mut Self {
        self.enum_constants.insert(name.into(), body);
        self
    }

    /// Add an enum constant without arguments or body.
    pub fn add_enum_constant_of(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let body = TypeSpec::anonymous_class_builder().build()?;
        Ok(self.add_enum_constant(name, body))
    }

    pub fn enum_constants_mut(&mut self) -> &mut IndexMap<String, TypeSpec> {
        &mut self.enum_constants
    }

    /// Add a property, replacing any property with the same name.
    pub fn add_property(&mut self, property: PropertySpec) -> &mut Self {
        self.properties
            .insert(property.name().to_string(), property);
        self
    }

    pub fn properties_mut(&mut self) -> &mut IndexMap<String, PropertySpec> {
        &mut self.properties
    }

    pub fn add_init_block(&mut self, block: CodeBlock) -> &mut Self {
        self.init_blocks.push(block);
        self
    }

    pub fn add_fun(&mut self, fun: FunSpec) -> &mut Self {
        self.funs.push(fun);
        self
    }

    pub fn funs_mut(&mut self) -> &mut Vec<FunSpec> {
        &mut self.funs
    }

    pub fn add_type(&mut self, ty: TypeSpec) -> &mut Self {
        self.types.push(ty);
        self
    }

    pub fn types_mut(&mut self) -> &mut Vec<TypeSpec> {
        &mut self.types
    }

    pub fn build(self) -> Result<TypeSpec> {
        let label = self.kind.label();
        let display_name = self.name.clone().unwrap_or_else(|| "<anonymous>".to_string());
        let illegal = |member: &str| -> Result<TypeSpec> {
            Err(Error::illegal_member(label, &display_name, member))
        };

        if let Some(name) = &self.name {
            check_name(name, label)?;
        }
        if self.name.is_none() && !matches!(self.kind, TypeKind::Class | TypeKind::Companion) {
            return illegal("an empty name");
        }

        if let Some(constructor) = &self.primary_constructor {
            if constructor.kind() != FunKind::Constructor {
                return illegal("a primary constructor that is not a constructor");
            }
            if matches!(
                self.kind,
                TypeKind::Interface | TypeKind::Object | TypeKind::Companion
            ) || self.name.is_none()
            {
                return illegal("a primary constructor");
            }
        }
        if self.kind == TypeKind::Interface {
            if self.superclass.is_some() {
                return illegal("a superclass");
            }
            if !self.init_blocks.is_empty() {
                return illegal("init blocks");
            }
        }
        if self.superclass.is_none()
            && !self.superclass_constructor_params.is_empty()
            && self.name.is_some()
        {
            return illegal("superclass constructor parameters without a superclass");
        }
        if matches!(
            self.kind,
            TypeKind::Interface | TypeKind::Object | TypeKind::Companion
        ) && self.funs.iter().any(FunSpec::is_constructor)
        {
            return illegal("constructors");
        }
        if self.funs.iter().any(FunSpec::is_accessor) {
            return illegal("accessor functions");
        }
        if self.kind == TypeKind::Enum {
            if self.enum_constants.is_empty() {
                return illegal("an empty constant list");
            }
        } else if !self.enum_constants.is_empty() {
            return illegal("enum constants");
        }
        for constant in self.enum_constants.keys() {
            check_name(constant, "enum constant")?;
        }
        if let Some(name) = first_duplicate(self.properties.values().map(PropertySpec::name)) {
            return illegal(&format!("two properties named '{name}'"));
        }
        if self.kind == TypeKind::Class && self.name.is_some() {
            let is_abstract = self.modifiers.contains(&KModifier::Abstract)
                || self.modifiers.contains(&KModifier::Sealed);
            if !is_abstract {
                if let Some(fun) = self.funs.iter().find(|f| f.is_abstract()) {
                    return illegal(&format!("abstract function '{}'", fun.name()));
                }
            }
        }
        if self
            .types
            .iter()
            .filter(|t| t.kind == TypeKind::Companion)
            .count()
            > 1
        {
            return illegal("more than one companion object");
        }

        Ok(TypeSpec {
            kind: self.kind,
            name: self.name,
            kdoc: self.kdoc.build()?,
            annotations: self.annotations,
            modifiers: self.modifiers,
            type_variables: self.type_variables,
            primary_constructor: self.primary_constructor,
            superclass: self.superclass,
            superclass_constructor_params: self.superclass_constructor_params,
            superinterfaces: self.superinterfaces.into_iter().collect(),
            enum_constants: self.enum_constants.into_iter().collect(),
            properties: self.properties.into_values().collect(),
            init_blocks: self.init_blocks,
            funs: self.funs,
            types: self.types,
        })
    }
}
