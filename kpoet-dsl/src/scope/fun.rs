use std::ops::AddAssign;

use kpoet::{
    AnnotationSpec, CodeBlock, CodeBlockBuilder, FunSpec, FunSpecBuilder, KModifier,
    ParameterSpec, Result, TypeName, TypeVariable,
};

use super::{BuilderScope, CodeAppend, CodeView};
use crate::collection::{SpecList, SpecMap};

/// Scope configuring a [`FunSpec`]: functions, constructors and accessors.
///
/// The [`CodeAppend`] methods write to the function body.
#[derive(Debug)]
pub struct FunScope {
    builder: FunSpecBuilder,
}

impl FunScope {
    pub fn new(builder: FunSpecBuilder) -> Self {
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

    /// Set the return type. Calling again replaces it.
    pub fn returns(&mut self, return_type: impl Into<TypeName>) -> &mut Self {
        self.builder.returns(return_type);
        self
    }

    /// Make this an extension function on `receiver`.
    pub fn receiver(&mut self, receiver: impl Into<TypeName>) -> &mut Self {
        self.builder.receiver(receiver);
        self
    }

    pub fn type_variable(&mut self, var: TypeVariable) -> &mut Self {
        self.builder.add_type_variable(var);
        self
    }

    /// The parameters, keyed by name.
    pub fn parameters(&mut self) -> SpecMap<'_, ParameterSpec> {
        SpecMap::new(self.builder.parameters_mut())
    }

    pub fn annotations(&mut self) -> SpecList<'_, AnnotationSpec> {
        SpecList::new(self.builder.annotations_mut())
    }

    pub fn kdoc(&mut self) -> CodeView<'_> {
        CodeView::new(self.builder.kdoc_mut())
    }

    /// Delegate to `this(args)`. Only valid on constructors.
    pub fn call_this_constructor(
        &mut self,
        args: impl IntoIterator<Item = CodeBlock>,
    ) -> &mut Self {
        self.builder.call_this_constructor(args);
        self
    }

    /// Delegate to `super(args)`. Only valid on constructors.
    pub fn call_super_constructor(
        &mut self,
        args: impl IntoIterator<Item = CodeBlock>,
    ) -> &mut Self {
        self.builder.call_super_constructor(args);
        self
    }

    pub fn builder_mut(&mut self) -> &mut FunSpecBuilder {
        &mut self.builder
    }
}

impl CodeAppend for FunScope {
    fn code_mut(&mut self) -> &mut CodeBlockBuilder {
        self.builder.body_mut()
    }
}

impl BuilderScope for FunScope {
    type Spec = FunSpec;
    const KIND: &'static str = "fun";

    fn spec_name(&self) -> Option<&str> {
        Some(self.builder.name())
    }

    fn finish(self) -> Result<FunSpec> {
        self.builder.build()
    }
}

impl AddAssign<ParameterSpec> for FunScope {
    fn add_assign(&mut self, parameter: ParameterSpec) {
        self.builder.add_parameter(parameter);
    }
}

impl AddAssign<AnnotationSpec> for FunScope {
    fn add_assign(&mut self, annotation: AnnotationSpec) {
        self.builder.add_annotation(annotation);
    }
}

impl AddAssign<CodeBlock> for FunScope {
    fn add_assign(&mut self, code: CodeBlock) {
        self.append_code(&code);
    }
}

#[cfg(test)]
mod tests {
    use kpoet::{ClassName, Error, args};

    use super::*;
    use crate::scope::run;

    fn fun(name: &str, configure: impl FnOnce(&mut FunScope) -> Result<()>) -> Result<FunSpec> {
        run(FunScope::new(FunSpec::builder(name)), configure)
    }

    #[test]
    fn test_matches_direct_builder() {
        let dsl = fun("drive", |f| {
            f.add_modifiers([KModifier::Override]).returns(TypeName::string());
            f.parameters().add_parameter("speed", TypeName::int(), |_| Ok(()))?;
            f.append_flow("if (%N > %L)", args!["speed", 120], |f| {
                f.append_line("return %S", args!["too fast"])?;
                Ok(())
            })?;
            f.append_line("return %S", args!["ok"])?;
            Ok(())
        })
        .unwrap();

        let mut direct = FunSpec::builder("drive");
        direct
            .add_modifiers([KModifier::Override])
            .returns(TypeName::string())
            .add_parameter_of("speed", TypeName::int())
            .unwrap()
            .begin_control_flow("if (%N > %L)", args!["speed", 120])
            .unwrap()
            .add_statement("return %S", args!["too fast"])
            .unwrap()
            .end_control_flow()
            .unwrap()
            .add_statement("return %S", args!["ok"])
            .unwrap();

        assert_eq!(dsl, direct.build().unwrap());
    }

    #[test]
    fn test_parameters_keep_last_write() {
        let spec = fun("park", |f| {
            f.parameters().add_parameter("slot", TypeName::int(), |_| Ok(()))?;
            f.parameters().add_parameter("slot", TypeName::string(), |_| Ok(()))?;
            *f += ParameterSpec::new("level", TypeName::int())?;
            Ok(())
        })
        .unwrap();

        let names: Vec<_> = spec.parameters().iter().map(ParameterSpec::name).collect();
        assert_eq!(names, ["slot", "level"]);
        assert_eq!(spec.parameter("slot").unwrap().type_name(), &TypeName::string());
    }

    #[test]
    fn test_kdoc_and_annotations() {
        let spec = fun("honk", |f| {
            f.kdoc().append("Sound the horn.\n", args![])?;
            *f += AnnotationSpec::of(ClassName::new("kotlin", "Deprecated"));
            *f += CodeBlock::of("println(%S)\n", args!["Beep"])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(
            spec.to_string(),
            "/**\n * Sound the horn.\n */\n@Deprecated\nfun honk() {\n  println(\"Beep\")\n}\n"
        );
    }

    #[test]
    fn test_constructor_delegation() {
        let spec = run(FunScope::new(FunSpec::constructor_builder()), |c| {
            c.parameters().add_parameter("name", TypeName::string(), |_| Ok(()))?;
            c.call_this_constructor([CodeBlock::of("%N, %L", args!["name", 4])?]);
            Ok(())
        })
        .unwrap();
        assert_eq!(spec.to_string(), "constructor(name: String) : this(name, 4)\n");
    }

    #[test]
    fn test_abstract_with_body_is_rejected() {
        let err = fun("drive", |f| {
            f.add_modifier(KModifier::Abstract)
                .append_line("return", args![])?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(*err, Error::AbstractWithBody { .. }));
    }
}
