//! Properties, with optional accessors.

use std::fmt;

use crate::{
    code::{Arg, CodeBlock, CodeBlockBuilder, escape_name},
    error::{Error, Result, check_name},
    render::CodeWriter,
    spec::{AnnotationSpec, FunKind, FunSpec, ParameterSpec},
    types::{KModifier, Modifiers, TypeName, TypeVariable, insert_modifier},
};

/// A property declaration such as `val wheels: Int = 4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertySpec {
    name: String,
    type_name: TypeName,
    mutable: bool,
    modifiers: Modifiers,
    annotations: Vec<AnnotationSpec>,
    kdoc: CodeBlock,
    initializer: Option<CodeBlock>,
    delegate: Option<CodeBlock>,
    receiver: Option<TypeName>,
    type_variables: Vec<TypeVariable>,
    getter: Option<FunSpec>,
    setter: Option<FunSpec>,
}

impl PropertySpec {
    /// Create a builder for a `val`.
    pub fn builder(name: impl Into<String>, type_name: impl Into<TypeName>) -> PropertySpecBuilder {
        PropertySpecBuilder {
            name: name.into(),
            type_name: type_name.into(),
            mutable: false,
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            kdoc: CodeBlock::builder(),
            initializer: None,
            delegate: None,
            receiver: None,
            type_variables: Vec::new(),
            getter: None,
            setter: None,
        }
    }

    /// Create a plain `val name: Type`.
    pub fn new(name: impl Into<String>, type_name: impl Into<TypeName>) -> Result<Self> {
        Self::builder(name, type_name).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Whether this is a `var`.
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn annotations(&self) -> &[AnnotationSpec] {
        &self.annotations
    }

    pub fn kdoc(&self) -> &CodeBlock {
        &self.kdoc
    }

    pub fn initializer(&self) -> Option<&CodeBlock> {
        self.initializer.as_ref()
    }

    pub fn delegate(&self) -> Option<&CodeBlock> {
        self.delegate.as_ref()
    }

    pub fn receiver(&self) -> Option<&TypeName> {
        self.receiver.as_ref()
    }

    pub fn type_variables(&self) -> &[TypeVariable] {
        &self.type_variables
    }

    pub fn getter(&self) -> Option<&FunSpec> {
        self.getter.as_ref()
    }

    pub fn setter(&self) -> Option<&FunSpec> {
        self.setter.as_ref()
    }

    /// Create a builder pre-filled with this property.
    pub fn to_builder(&self) -> PropertySpecBuilder {
        PropertySpecBuilder {
            name: self.name.clone(),
            type_name: self.type_name.clone(),
            mutable: self.mutable,
            modifiers: self.modifiers.clone(),
            annotations: self.annotations.clone(),
            kdoc: self.kdoc.to_builder(),
            initializer: self.initializer.clone(),
            delegate: self.delegate.clone(),
            receiver: self.receiver.clone(),
            type_variables: self.type_variables.clone(),
            getter: self.getter.clone(),
            setter: self.setter.clone(),
        }
    }

    /// Whether this property can be declared by the primary constructor
    /// parameter `param`.
    pub(crate) fn is_declared_by(&self, param: &ParameterSpec) -> bool {
        self.name == param.name()
            && self.type_name == *param.type_name()
            && self.kdoc.is_empty()
            && self.getter.is_none()
            && self.setter.is_none()
            && self.delegate.is_none()
            && self.receiver.is_none()
            && self
                .initializer
                .as_ref()
                .and_then(CodeBlock::as_plain_text)
                .is_some_and(|init| init == self.name)
    }

    pub(crate) fn emit(&self, w: &mut CodeWriter) {
        w.emit_kdoc(&self.kdoc);
        w.emit_annotations(&self.annotations, false);
        w.emit_modifiers(&self.modifiers);
        w.text(self.keyword());
        if !self.type_variables.is_empty() {
            w.emit_type_variables(&self.type_variables);
            w.text(" ");
        }
        if let Some(receiver) = &self.receiver {
            w.emit_type(receiver).text(".");
        }
        w.text(&escape_name(&self.name)).text(": ");
        w.emit_type(&self.type_name);
        w.emit_where_clause(&self.type_variables);
        if let Some(initializer) = &self.initializer {
            w.text(" = ").emit_code(initializer);
        }
        if let Some(delegate) = &self.delegate {
            w.text(" by ").emit_code(delegate);
        }
        w.newline();

        for accessor in [&self.getter, &self.setter].into_iter().flatten() {
            w.indent();
            accessor.emit(w, false);
            w.dedent();
        }
    }

    /// Write the property merged into its primary constructor parameter.
    pub(crate) fn emit_in_constructor(&self, w: &mut CodeWriter, param: &ParameterSpec) {
        w.emit_annotations(&self.annotations, true);
        w.emit_modifiers(&self.modifiers);
        w.text(self.keyword());
        param.emit(w);
    }

    fn keyword(&self) -> &'static str {
        if self.mutable { "var " } else { "val " }
    }
}

impl fmt::Display for PropertySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = CodeWriter::standalone(Default::default());
        self.emit(&mut writer);
        f.write_str(&writer.finish())
    }
}

impl From<&PropertySpec> for Arg {
    fn from(value: &PropertySpec) -> Self {
        Arg::Text(value.name.clone())
    }
}

/// Builder for [`PropertySpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpecBuilder {
    name: String,
    type_name: TypeName,
    mutable: bool,
    modifiers: Modifiers,
    annotations: Vec<AnnotationSpec>,
    kdoc: CodeBlockBuilder,
    initializer: Option<CodeBlock>,
    delegate: Option<CodeBlock>,
    receiver: Option<TypeName>,
    type_variables: Vec<TypeVariable>,
    getter: Option<FunSpec>,
    setter: Option<FunSpec>,
}

impl PropertySpecBuilder {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&mut self, type_name: impl Into<TypeName>) -> &mut Self {
        self.type_name = type_name.into();
        self
    }

    /// Declare as `var` (`true`) or `val` (`false`).
    pub fn mutable(&mut self, mutable: bool) -> &mut Self {
        self.mutable = mutable;
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

    pub fn initializer(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.initializer = Some(CodeBlock::of(format, args)?);
        Ok(self)
    }

    pub fn initializer_code(&mut self, code: CodeBlock) -> &mut Self {
        self.initializer = Some(code);
        self
    }

    /// Set the delegate expression, rendered after `by`.
    pub fn delegate(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.delegate = Some(CodeBlock::of(format, args)?);
        Ok(self)
    }

    pub fn delegate_code(&mut self, code: CodeBlock) -> &mut Self {
        self.delegate = Some(code);
        self
    }

    /// Set the extension receiver.
    pub fn receiver(&mut self, receiver: impl Into<TypeName>) -> &mut Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn add_type_variable(&mut self, var: TypeVariable) -> &mut Self {
        self.type_variables.push(var);
        self
    }

    pub fn getter(&mut self, getter: FunSpec) -> &mut Self {
        self.getter = Some(getter);
        self
    }

    pub fn setter(&mut self, setter: FunSpec) -> &mut Self {
        self.setter = Some(setter);
        self
    }

    pub fn build(self) -> Result<PropertySpec> {
        check_name(&self.name, "property")?;
        if self.initializer.is_some() && self.delegate.is_some() {
            return Err(Error::illegal_member(
                "property",
                &self.name,
                "both an initializer and a delegate",
            ));
        }
        if self.getter.as_ref().is_some_and(|g| g.kind() != FunKind::Getter) {
            return Err(Error::illegal_member(
                "property",
                &self.name,
                "a getter that is not a get accessor",
            ));
        }
        if let Some(setter) = &self.setter {
            if setter.kind() != FunKind::Setter {
                return Err(Error::illegal_member(
                    "property",
                    &self.name,
                    "a setter that is not a set accessor",
                ));
            }
            if !self.mutable {
                return Err(Error::illegal_member("val", &self.name, "a setter"));
            }
        }

        Ok(PropertySpec {
            name: self.name,
            type_name: self.type_name,
            mutable: self.mutable,
            modifiers: self.modifiers,
            annotations: self.annotations,
            kdoc: self.kdoc.build()?,
            initializer: self.initializer,
            delegate: self.delegate,
            receiver: self.receiver,
            type_variables: self.type_variables,
            getter: self.getter,
            setter: self.setter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_val_with_initializer() {
        let mut builder = PropertySpec::builder("wheels", TypeName::int());
        builder
            .add_modifier(KModifier::Private)
            .initializer("%L", args![4])
            .unwrap();
        assert_eq!(
            builder.build().unwrap().to_string(),
            "private val wheels: Int = 4\n"
        );
    }

    #[test]
    fn test_var_with_accessors() {
        let mut getter = FunSpec::getter_builder();
        getter.add_statement("return field", args![]).unwrap();
        let mut setter = FunSpec::setter_builder();
        setter.add_modifier(KModifier::Private);

        let mut builder = PropertySpec::builder("speed", TypeName::int());
        builder
            .mutable(true)
            .initializer("0", args![])
            .unwrap()
            .getter(getter.build().unwrap())
            .setter(setter.build().unwrap());

        assert_eq!(
            builder.build().unwrap().to_string(),
            "var speed: Int = 0\n  get() {\n    return field\n  }\n  private set\n"
        );
    }

    #[test]
    fn test_delegated_property() {
        let mut builder = PropertySpec::builder("name", TypeName::string());
        builder.delegate("lazy { %S }", args!["car"]).unwrap();
        assert_eq!(
            builder.build().unwrap().to_string(),
            "val name: String by lazy { \"car\" }\n"
        );
    }

    #[test]
    fn test_initializer_and_delegate_conflict() {
        let mut builder = PropertySpec::builder("name", TypeName::string());
        builder
            .initializer("%S", args!["a"])
            .unwrap()
            .delegate("lazy { %S }", args!["b"])
            .unwrap();
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_setter_on_val_is_rejected() {
        let mut builder = PropertySpec::builder("name", TypeName::string());
        builder.setter(FunSpec::setter_builder().build().unwrap());
        let err = builder.build().unwrap_err();
        assert_eq!(err.to_string(), "val 'name' cannot have a setter");
    }

    #[test]
    fn test_wrong_accessor_kind() {
        let mut builder = PropertySpec::builder("name", TypeName::string());
        builder.getter(FunSpec::setter_builder().build().unwrap());
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_extension_property() {
        let mut getter = FunSpec::getter_builder();
        getter.add_statement("return length / 2", args![]).unwrap();

        let mut builder = PropertySpec::builder("half", TypeName::int());
        builder
            .receiver(TypeName::string())
            .getter(getter.build().unwrap());
        assert_eq!(
            builder.build().unwrap().to_string(),
            "val String.half: Int\n  get() {\n    return length / 2\n  }\n"
        );
    }

    #[test]
    fn test_declared_by_constructor_parameter() {
        let param = ParameterSpec::new("name", TypeName::string()).unwrap();
        let mut builder = PropertySpec::builder("name", TypeName::string());
        builder.initializer("name", args![]).unwrap();
        assert!(builder.build().unwrap().is_declared_by(&param));

        let other = PropertySpec::new("name", TypeName::string()).unwrap();
        assert!(!other.is_declared_by(&param));
    }
}
