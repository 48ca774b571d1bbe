use std::ops::AddAssign;

use kpoet::{AnnotationSpec, AnnotationSpecBuilder, Arg, CodeBlock, Result, UseSiteTarget};

use super::BuilderScope;
use crate::collection::SpecList;

/// Scope configuring an [`AnnotationSpec`].
#[derive(Debug)]
pub struct AnnotationScope {
    builder: AnnotationSpecBuilder,
}

impl AnnotationScope {
    pub fn new(builder: AnnotationSpecBuilder) -> Self {
        Self { builder }
    }

    /// Add a member value such as `name = %S`.
    pub fn member(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.builder.add_member(format, args)?;
        Ok(self)
    }

    pub fn member_code(&mut self, code: CodeBlock) -> &mut Self {
        self.builder.add_member_code(code);
        self
    }

    pub fn use_site_target(&mut self, target: UseSiteTarget) -> &mut Self {
        self.builder.use_site_target(target);
        self
    }

    /// The member values, in declaration order.
    pub fn members(&mut self) -> SpecList<'_, CodeBlock> {
        SpecList::new(self.builder.members_mut())
    }

    pub fn builder_mut(&mut self) -> &mut AnnotationSpecBuilder {
        &mut self.builder
    }
}

impl BuilderScope for AnnotationScope {
    type Spec = AnnotationSpec;
    const KIND: &'static str = "annotation";

    fn spec_name(&self) -> Option<&str> {
        None
    }

    fn finish(self) -> Result<AnnotationSpec> {
        self.builder.build()
    }
}

impl AddAssign<CodeBlock> for AnnotationScope {
    fn add_assign(&mut self, member: CodeBlock) {
        self.member_code(member);
    }
}

#[cfg(test)]
mod tests {
    use kpoet::{ClassName, args};

    use super::*;
    use crate::scope::run;

    fn deprecated() -> ClassName {
        ClassName::new("kotlin", "Deprecated")
    }

    #[test]
    fn test_matches_direct_builder() {
        let dsl = run(AnnotationScope::new(AnnotationSpec::builder(deprecated())), |a| {
            a.member("message = %S", args!["use Car"])?;
            a.members().add_code("level = %L", args!["DeprecationLevel.ERROR"])?;
            Ok(())
        })
        .unwrap();

        let mut direct = AnnotationSpec::builder(deprecated());
        direct
            .add_member("message = %S", args!["use Car"])
            .unwrap()
            .add_member("level = %L", args!["DeprecationLevel.ERROR"])
            .unwrap();

        assert_eq!(dsl, direct.build().unwrap());
        assert_eq!(
            dsl.to_string(),
            "@Deprecated(message = \"use Car\", level = DeprecationLevel.ERROR)"
        );
    }

    #[test]
    fn test_use_site_target_and_add_assign() {
        let spec = run(
            AnnotationScope::new(AnnotationSpec::builder(ClassName::new(
                "kotlin.jvm",
                "JvmStatic",
            ))),
            |a| {
                a.use_site_target(UseSiteTarget::Get);
                *a += CodeBlock::of("%S", args!["x"])?;
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(spec.use_site_target(), Some(UseSiteTarget::Get));
        assert_eq!(spec.members().len(), 1);
    }
}
