use std::fmt;

use crate::{
    code::{Arg, CodeBlock, CodeBlockBuilder, escape_name},
    error::{Result, check_name},
    render::CodeWriter,
    types::{KModifier, Modifiers, TypeName, TypeVariable, insert_modifier},
};

/// A type alias such as `typealias Garage = List<Car>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeAliasSpec {
    name: String,
    type_name: TypeName,
    modifiers: Modifiers,
    kdoc: CodeBlock,
    type_variables: Vec<TypeVariable>,
}

impl TypeAliasSpec {
    pub fn builder(
        name: impl Into<String>,
        type_name: impl Into<TypeName>,
    ) -> TypeAliasSpecBuilder {
        TypeAliasSpecBuilder {
            name: name.into(),
            type_name: type_name.into(),
            modifiers: Modifiers::new(),
            kdoc: CodeBlock::builder(),
            type_variables: Vec::new(),
        }
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

    pub fn kdoc(&self) -> &CodeBlock {
        &self.kdoc
    }

    pub fn type_variables(&self) -> &[TypeVariable] {
        &self.type_variables
    }

    pub(crate) fn emit(&self, w: &mut CodeWriter) {
        w.emit_kdoc(&self.kdoc);
        w.emit_modifiers(&self.modifiers);
        w.text("typealias ").text(&escape_name(&self.name));
        w.emit_type_variables(&self.type_variables);
        w.text(" = ").emit_type(&self.type_name);
        w.newline();
    }
}

impl fmt::Display for TypeAliasSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = CodeWriter::standalone(Default::default());
        self.emit(&mut writer);
        f.write_str(&writer.finish())
    }
}

impl From<&TypeAliasSpec> for Arg {
    fn from(value: &TypeAliasSpec) -> Self {
        Arg::Text(value.name.clone())
    }
}

/// Builder for [`TypeAliasSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasSpecBuilder {
    name: String,
    type_name: TypeName,
    modifiers: Modifiers,
    kdoc: CodeBlockBuilder,
    type_variables: Vec<TypeVariable>,
}

impl TypeAliasSpecBuilder {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&mut self, type_name: impl Into<TypeName>) -> &mut Self {
        self.type_name = type_name.into();
        self
    }

    pub fn add_modifier(&mut self, modifier: KModifier) -> &mut Self {
        insert_modifier(&mut self.modifiers, modifier);
        self
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

    pub fn add_type_variable(&mut self, var: TypeVariable) -> &mut Self {
        self.type_variables.push(var);
        self
    }

    pub fn build(self) -> Result<TypeAliasSpec> {
        check_name(&self.name, "type alias")?;
        Ok(TypeAliasSpec {
            name: self.name,
            type_name: self.type_name,
            modifiers: self.modifiers,
            kdoc: self.kdoc.build()?,
            type_variables: self.type_variables,
        })
    }
}
