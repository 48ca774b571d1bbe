use std::ops::AddAssign;

use kpoet::{
    AnnotationSpec, ClassName, FileMember, FileSpec, FileSpecBuilder, FunSpec, PropertySpec,
    Result, TypeAliasSpec, TypeName, TypeSpec, render::Import,
};

use super::{AnnotationScope, BuilderScope, CodeView, run};
use crate::collection::SpecList;

/// Scope configuring a [`FileSpec`].
///
/// Top-level declarations go through [`members`](Self::members), which keeps
/// them in declaration order.
#[derive(Debug)]
pub struct FileScope {
    builder: FileSpecBuilder,
}

impl FileScope {
    pub fn new(builder: FileSpecBuilder) -> Self {
        Self { builder }
    }

    /// The `//` comment written above the package statement.
    pub fn comment(&mut self) -> CodeView<'_> {
        CodeView::new(self.builder.comment_mut())
    }

    /// Add a file annotation such as `@file:JvmName("Cars")`.
    pub fn annotation<F>(
        &mut self,
        type_name: impl Into<TypeName>,
        configure: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut AnnotationScope) -> Result<()>,
    {
        let annotation = run(AnnotationScope::new(AnnotationSpec::builder(type_name)), configure)?;
        self.builder.add_annotation(annotation);
        Ok(self)
    }

    /// Import a class that no member references, e.g. for an extension
    /// function used only in code text.
    pub fn import(&mut self, class: &ClassName) -> &mut Self {
        self.builder.add_import(Import::new(class.canonical_name()));
        self
    }

    pub fn aliased_import(&mut self, class: &ClassName, alias: impl Into<String>) -> &mut Self {
        self.builder.add_aliased_import(class, alias);
        self
    }

    pub fn members(&mut self) -> SpecList<'_, FileMember> {
        SpecList::new(self.builder.members_mut())
    }

    pub fn builder_mut(&mut self) -> &mut FileSpecBuilder {
        &mut self.builder
    }
}

impl BuilderScope for FileScope {
    type Spec = FileSpec;
    const KIND: &'static str = "file";

    fn spec_name(&self) -> Option<&str> {
        Some(self.builder.name())
    }

    fn finish(self) -> Result<FileSpec> {
        self.builder.build()
    }
}

macro_rules! add_member {
    ($($ty:ty),+) => {
        $(
            impl AddAssign<$ty> for FileScope {
                fn add_assign(&mut self, member: $ty) {
                    self.builder.add_member(member);
                }
            }
        )+
    };
}

add_member!(FileMember, TypeSpec, FunSpec, PropertySpec, TypeAliasSpec);
