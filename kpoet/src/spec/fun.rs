//! Functions, constructors and property accessors.

use std::fmt;

use indexmap::IndexMap;

use crate::{
    code::{Arg, CodeBlock, CodeBlockBuilder, escape_name},
    error::{Error, Result, check_name},
    render::CodeWriter,
    spec::{AnnotationSpec, ParameterSpec, first_duplicate},
    types::{KModifier, Modifiers, TypeName, TypeVariable, insert_modifier},
};

/// What kind of function a [`FunSpec`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunKind {
    Function,
    Constructor,
    Getter,
    Setter,
}

impl FunKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Constructor => "constructor",
            Self::Getter => "getter",
            Self::Setter => "setter",
        }
    }
}

/// Which constructor a secondary constructor delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructorDelegate {
    This,
    Super,
}

impl ConstructorDelegate {
    fn keyword(&self) -> &'static str {
        match self {
            Self::This => "this",
            Self::Super => "super",
        }
    }
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunSpec {
    name: String,
    kind: FunKind,
    kdoc: CodeBlock,
    annotations: Vec<AnnotationSpec>,
    modifiers: Modifiers,
    type_variables: Vec<TypeVariable>,
    receiver: Option<TypeName>,
    return_type: Option<TypeName>,
    parameters: Vec<ParameterSpec>,
    body: CodeBlock,
    delegate_constructor: Option<ConstructorDelegate>,
    delegate_constructor_args: Vec<CodeBlock>,
}

impl FunSpec {
    /// Create a builder for a named function.
    pub fn builder(name: impl Into<String>) -> FunSpecBuilder {
        FunSpecBuilder::new(name.into(), FunKind::Function)
    }

    /// Create a builder for a constructor.
    pub fn constructor_builder() -> FunSpecBuilder {
        FunSpecBuilder::new("constructor".to_string(), FunKind::Constructor)
    }

    /// Create a builder for a property getter.
    pub fn getter_builder() -> FunSpecBuilder {
        FunSpecBuilder::new("get".to_string(), FunKind::Getter)
    }

    /// Create a builder for a property setter.
    pub fn setter_builder() -> FunSpecBuilder {
        FunSpecBuilder::new("set".to_string(), FunKind::Setter)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FunKind {
        self.kind
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

    pub fn receiver(&self) -> Option<&TypeName> {
        self.receiver.as_ref()
    }

    pub fn return_type(&self) -> Option<&TypeName> {
        self.return_type.as_ref()
    }

    /// Get the parameters in declaration order.
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Find a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn body(&self) -> &CodeBlock {
        &self.body
    }

    pub fn delegate_constructor(&self) -> Option<ConstructorDelegate> {
        self.delegate_constructor
    }

    pub fn delegate_constructor_args(&self) -> &[CodeBlock] {
        &self.delegate_constructor_args
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == FunKind::Constructor
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self.kind, FunKind::Getter | FunKind::Setter)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&KModifier::Abstract)
    }

    /// Create a builder pre-filled with this function.
    pub fn to_builder(&self) -> FunSpecBuilder {
        FunSpecBuilder {
            name: self.name.clone(),
            kind: self.kind,
            kdoc: self.kdoc.to_builder(),
            annotations: self.annotations.clone(),
            modifiers: self.modifiers.clone(),
            type_variables: self.type_variables.clone(),
            receiver: self.receiver.clone(),
            return_type: self.return_type.clone(),
            parameters: self
                .parameters
                .iter()
                .map(|p| (p.name().to_string(), p.clone()))
                .collect(),
            body: self.body.to_builder(),
            delegate_constructor: self.delegate_constructor,
            delegate_constructor_args: self.delegate_constructor_args.clone(),
        }
    }

    /// Write the declaration. Members of an interface without a body render
    /// without braces.
    pub(crate) fn emit(&self, w: &mut CodeWriter, in_interface: bool) {
        match self.kind {
            FunKind::Getter | FunKind::Setter => return self.emit_accessor(w),
            FunKind::Function | FunKind::Constructor => {}
        }

        self.emit_kdoc(w);
        w.emit_annotations(&self.annotations, false);
        if in_interface {
            // Interface members are implicitly abstract.
            let modifiers: Modifiers = self
                .modifiers
                .iter()
                .copied()
                .filter(|m| *m != KModifier::Abstract)
                .collect();
            w.emit_modifiers(&modifiers);
        } else {
            w.emit_modifiers(&self.modifiers);
        }

        if self.is_constructor() {
            w.text("constructor");
        } else {
            w.text("fun ");
            if !self.type_variables.is_empty() {
                w.emit_type_variables(&self.type_variables);
                w.text(" ");
            }
            if let Some(receiver) = &self.receiver {
                w.emit_type(receiver).text(".");
            }
            w.text(&escape_name(&self.name));
        }

        self.emit_parameters(w);

        if let Some(returns) = self.return_type.as_ref().filter(|r| !r.is_unit()) {
            w.text(": ").emit_type(returns);
        }
        if let Some(delegate) = self.delegate_constructor {
            w.text(" : ").text(delegate.keyword()).text("(");
            emit_joined(w, &self.delegate_constructor_args);
            w.text(")");
        }
        w.emit_where_clause(&self.type_variables);

        let bodiless = self.is_abstract()
            || (self.body.is_empty()
                && (in_interface
                    || self.is_constructor()
                    || self.modifiers.contains(&KModifier::External)));
        if bodiless {
            w.newline();
            return;
        }
        self.emit_body(w);
    }

    fn emit_accessor(&self, w: &mut CodeWriter) {
        self.emit_kdoc(w);
        w.emit_annotations(&self.annotations, true);
        w.emit_modifiers(&self.modifiers);
        w.text(&self.name);
        if self.body.is_empty() {
            w.newline();
            return;
        }
        self.emit_parameters(w);
        if let (FunKind::Getter, Some(returns)) = (self.kind, &self.return_type) {
            w.text(": ").emit_type(returns);
        }
        self.emit_body(w);
    }

    fn emit_parameters(&self, w: &mut CodeWriter) {
        if self.kind == FunKind::Setter && self.parameters.is_empty() {
            w.text("(value)");
            return;
        }
        w.text("(");
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                w.text(", ");
            }
            if self.kind == FunKind::Setter {
                // Setter parameters are untyped in Kotlin.
                w.text(&escape_name(param.name()));
            } else {
                param.emit(w);
            }
        }
        w.text(")");
    }

    fn emit_body(&self, w: &mut CodeWriter) {
        w.text(" {").newline().indent();
        w.emit_code(&self.body);
        if !w.at_line_start() {
            w.newline();
        }
        w.dedent().line("}");
    }

    fn emit_kdoc(&self, w: &mut CodeWriter) {
        let text = render_kdoc(w, &self.kdoc, &self.parameters);
        w.emit_kdoc_text(&text);
    }
}

/// Render `kdoc` followed by an `@param` line for every documented parameter.
pub(crate) fn render_kdoc(
    w: &mut CodeWriter,
    kdoc: &CodeBlock,
    params: &[ParameterSpec],
) -> String {
    let mut text = w.render_inline(kdoc);
    for param in params.iter().filter(|p| !p.kdoc().is_empty()) {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        let doc = w.render_inline(param.kdoc());
        text.push_str(&format!("@param {} {}", param.name(), doc));
    }
    text
}

fn emit_joined(w: &mut CodeWriter, blocks: &[CodeBlock]) {
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            w.text(", ");
        }
        w.emit_code(block);
    }
}

impl fmt::Display for FunSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = CodeWriter::standalone(Default::default());
        self.emit(&mut writer, false);
        f.write_str(&writer.finish())
    }
}

impl From<&FunSpec> for Arg {
    fn from(value: &FunSpec) -> Self {
        Arg::Text(value.name.clone())
    }
}

/// Builder for [`FunSpec`].
///
/// Parameters are keyed by name: adding a parameter whose name is already
/// present replaces it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FunSpecBuilder {
    name: String,
    kind: FunKind,
    kdoc: CodeBlockBuilder,
    annotations: Vec<AnnotationSpec>,
    modifiers: Modifiers,
    type_variables: Vec<TypeVariable>,
    receiver: Option<TypeName>,
    return_type: Option<TypeName>,
    parameters: IndexMap<String, ParameterSpec>,
    body: CodeBlockBuilder,
    delegate_constructor: Option<ConstructorDelegate>,
    delegate_constructor_args: Vec<CodeBlock>,
}

impl FunSpecBuilder {
    fn new(name: String, kind: FunKind) -> Self {
        Self {
            name,
            kind,
            kdoc: CodeBlock::builder(),
            annotations: Vec::new(),
            modifiers: Modifiers::new(),
            type_variables: Vec::new(),
            receiver: None,
            return_type: None,
            parameters: IndexMap::new(),
            body: CodeBlock::builder(),
            delegate_constructor: None,
            delegate_constructor_args: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FunKind {
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

    /// Set the extension receiver.
    pub fn receiver(&mut self, receiver: impl Into<TypeName>) -> &mut Self {
        self.receiver = Some(receiver.into());
        self
    }

    /// Set the return type. `Unit` is accepted and omitted when rendered.
    pub fn returns(&mut self, return_type: impl Into<TypeName>) -> &mut Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Add a parameter, replacing any parameter with the same name.
    pub fn add_parameter(&mut self, parameter: ParameterSpec) -> &mut Self {
        self.parameters
            .insert(parameter.name().to_string(), parameter);
        self
    }

    /// Add a plain `name: Type` parameter.
    pub fn add_parameter_of(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<TypeName>,
    ) -> Result<&mut Self> {
        let parameter = ParameterSpec::new(name, type_name)?;
        Ok(self.add_parameter(parameter))
    }

    /// Mutable access to the parameters, keyed by name.
    pub fn parameters_mut(&mut self) -> &mut IndexMap<String, ParameterSpec> {
        &mut self.parameters
    }

    /// Append code to the body without a trailing newline.
    pub fn add_code(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.body.add(format, args)?;
        Ok(self)
    }

    pub fn add_statement(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.body.add_statement(format, args)?;
        Ok(self)
    }

    pub fn add_comment(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.body.add_comment(format, args)?;
        Ok(self)
    }

    pub fn begin_control_flow(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.body.begin_control_flow(format, args)?;
        Ok(self)
    }

    pub fn next_control_flow(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.body.next_control_flow(format, args)?;
        Ok(self)
    }

    pub fn end_control_flow(&mut self) -> Result<&mut Self> {
        self.body.end_control_flow()?;
        Ok(self)
    }

    /// Append a pre-built block to the body.
    pub fn add_body_code(&mut self, code: &CodeBlock) -> &mut Self {
        self.body.add_code(code);
        self
    }

    pub fn body_mut(&mut self) -> &mut CodeBlockBuilder {
        &mut self.body
    }

    /// Delegate to another constructor of the same class.
    pub fn call_this_constructor(
        &mut self,
        args: impl IntoIterator<Item = CodeBlock>,
    ) -> &mut Self {
        self.delegate_constructor = Some(ConstructorDelegate::This);
        self.delegate_constructor_args = args.into_iter().collect();
        self
    }

    /// Delegate to a superclass constructor.
    pub fn call_super_constructor(
        &mut self,
        args: impl IntoIterator<Item = CodeBlock>,
    ) -> &mut Self {
        self.delegate_constructor = Some(ConstructorDelegate::Super);
        self.delegate_constructor_args = args.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<FunSpec> {
        let label = self.kind.label();
        check_name(&self.name, label)?;

        if self.modifiers.contains(&KModifier::Abstract) && !self.body.is_empty() {
            return Err(Box::new(Error::AbstractWithBody { name: self.name }));
        }
        match self.kind {
            FunKind::Function => {
                if self.delegate_constructor.is_some() {
                    return Err(Error::illegal_member(label, &self.name, "a delegate constructor"));
                }
            }
            FunKind::Constructor => {
                if self.return_type.is_some() {
                    return Err(Error::illegal_member(label, &self.name, "a return type"));
                }
                if self.receiver.is_some() {
                    return Err(Error::illegal_member(label, &self.name, "a receiver"));
                }
            }
            FunKind::Getter | FunKind::Setter => {
                if self.receiver.is_some() || !self.type_variables.is_empty() {
                    return Err(Error::illegal_member(
                        label,
                        &self.name,
                        "a receiver or type variables",
                    ));
                }
                if self.delegate_constructor.is_some() {
                    return Err(Error::illegal_member(label, &self.name, "a delegate constructor"));
                }
            }
        }
        if let Some(param) = first_duplicate(self.parameters.values().map(ParameterSpec::name)) {
            return Err(Error::illegal_member(
                label,
                &self.name,
                format!("two parameters named '{param}'"),
            ));
        }
        if self.kind == FunKind::Getter && !self.parameters.is_empty() {
            return Err(Error::illegal_member(label, &self.name, "parameters"));
        }
        if self.kind == FunKind::Setter {
            if self.parameters.len() > 1 {
                return Err(Error::illegal_member(label, &self.name, "more than one parameter"));
            }
            if self.return_type.is_some() {
                return Err(Error::illegal_member(label, &self.name, "a return type"));
            }
        }

        Ok(FunSpec {
            name: self.name,
            kind: self.kind,
            kdoc: self.kdoc.build()?,
            annotations: self.annotations,
            modifiers: self.modifiers,
            type_variables: self.type_variables,
            receiver: self.receiver,
            return_type: self.return_type,
            parameters: self.parameters.into_values().collect(),
            body: self.body.build()?,
            delegate_constructor: self.delegate_constructor,
            delegate_constructor_args: self.delegate_constructor_args,
        })
    }
}
