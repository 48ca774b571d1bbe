use kpoet::{KModifier, Result, TypeAliasSpec, TypeAliasSpecBuilder, TypeName, TypeVariable};

use super::{BuilderScope, CodeView};

/// Scope configuring a [`TypeAliasSpec`].
#[derive(Debug)]
pub struct TypeAliasScope {
    builder: TypeAliasSpecBuilder,
}

impl TypeAliasScope {
    pub fn new(builder: TypeAliasSpecBuilder) -> Self {
        Self { builder }
    }

    /// Replace the aliased type.
    pub fn type_name(&mut self, type_name: impl Into<TypeName>) -> &mut Self {
        self.builder.type_name(type_name);
        self
    }

    pub fn add_modifier(&mut self, modifier: KModifier) -> &mut Self {
        self.builder.add_modifier(modifier);
        self
    }

    pub fn type_variable(&mut self, var: TypeVariable) -> &mut Self {
        self.builder.add_type_variable(var);
        self
    }

    pub fn kdoc(&mut self) -> CodeView<'_> {
        CodeView::new(self.builder.kdoc_mut())
    }
}

impl BuilderScope for TypeAliasScope {
    type Spec = TypeAliasSpec;
    const KIND: &'static str = "typealias";

    fn spec_name(&self) -> Option<&str> {
        Some(self.builder.name())
    }

    fn finish(self) -> Result<TypeAliasSpec> {
        self.builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::run;

    #[test]
    fn test_matches_direct_builder() {
        let element = TypeVariable::new("T");
        let dsl = run(
            TypeAliasScope::new(TypeAliasSpec::builder(
                "Fleet",
                TypeName::list(element.clone().into()),
            )),
            |alias| {
                alias
                    .add_modifier(KModifier::Internal)
                    .type_variable(element.clone());
                Ok(())
            },
        )
        .unwrap();

        let mut direct = TypeAliasSpec::builder("Fleet", TypeName::list(element.clone().into()));
        direct
            .add_modifier(KModifier::Internal)
            .add_type_variable(element);

        assert_eq!(dsl, direct.build().unwrap());
        assert_eq!(dsl.to_string(), "internal typealias Fleet<T> = List<T>\n");
    }
}
