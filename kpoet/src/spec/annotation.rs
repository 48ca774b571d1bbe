//! Annotation usages.

use std::fmt;

use crate::{
    code::{Arg, CodeBlock},
    error::{Error, Result},
    render::CodeWriter,
    types::{ClassName, TypeName},
};

/// Where an annotation applies when its target is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseSiteTarget {
    File,
    Property,
    Field,
    Get,
    Set,
    Receiver,
    Param,
    SetParam,
    Delegate,
}

impl UseSiteTarget {
    /// Get the Kotlin keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Property => "property",
            Self::Field => "field",
            Self::Get => "get",
            Self::Set => "set",
            Self::Receiver => "receiver",
            Self::Param => "param",
            Self::SetParam => "setparam",
            Self::Delegate => "delegate",
        }
    }
}

/// An annotation usage such as `@JvmName("car")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationSpec {
    type_name: TypeName,
    members: Vec<CodeBlock>,
    use_site_target: Option<UseSiteTarget>,
}

impl AnnotationSpec {
    /// Create a builder for an annotation of `type_name`.
    pub fn builder(type_name: impl Into<TypeName>) -> AnnotationSpecBuilder {
        AnnotationSpecBuilder {
            type_name: type_name.into(),
            members: Vec::new(),
            use_site_target: None,
        }
    }

    /// Create an annotation without members.
    pub fn of(class: ClassName) -> Self {
        Self {
            type_name: TypeName::Class(class),
            members: Vec::new(),
            use_site_target: None,
        }
    }

    /// Get the annotation type.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Get the member values in declaration order.
    pub fn members(&self) -> &[CodeBlock] {
        &self.members
    }

    /// Get the use-site target.
    pub fn use_site_target(&self) -> Option<UseSiteTarget> {
        self.use_site_target
    }

    /// Create a builder pre-filled with this annotation.
    pub fn to_builder(&self) -> AnnotationSpecBuilder {
        AnnotationSpecBuilder {
            type_name: self.type_name.clone(),
            members: self.members.clone(),
            use_site_target: self.use_site_target,
        }
    }

    pub(crate) fn with_use_site_target(mut self, target: UseSiteTarget) -> Self {
        self.use_site_target = Some(target);
        self
    }

    pub(crate) fn emit(&self, w: &mut CodeWriter) {
        w.text("@");
        if let Some(target) = self.use_site_target {
            w.text(target.keyword()).text(":");
        }
        w.emit_type(&self.type_name);
        if !self.members.is_empty() {
            w.text("(");
            for (i, member) in self.members.iter().enumerate() {
                if i > 0 {
                    w.text(", ");
                }
                w.emit_code(member);
            }
            w.text(")");
        }
    }
}

impl fmt::Display for AnnotationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = CodeWriter::standalone(Default::default());
        self.emit(&mut writer);
        f.write_str(&writer.finish())
    }
}

/// Builder for [`AnnotationSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSpecBuilder {
    type_name: TypeName,
    members: Vec<CodeBlock>,
    use_site_target: Option<UseSiteTarget>,
}

impl AnnotationSpecBuilder {
    /// Add a member value, e.g. `name = %S`.
    pub fn add_member(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        self.members.push(CodeBlock::of(format, args)?);
        Ok(self)
    }

    /// Add a pre-built member value.
    pub fn add_member_code(&mut self, code: CodeBlock) -> &mut Self {
        self.members.push(code);
        self
    }

    /// Mutable access to the member values.
    pub fn members_mut(&mut self) -> &mut Vec<CodeBlock> {
        &mut self.members
    }

    /// Set the use-site target.
    pub fn use_site_target(&mut self, target: UseSiteTarget) -> &mut Self {
        self.use_site_target = Some(target);
        self
    }

    /// Get the annotation type.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Finish the annotation.
    pub fn build(self) -> Result<AnnotationSpec> {
        match &self.type_name {
            TypeName::Class(_) | TypeName::Parameterized { .. } => {}
            other => {
                return Err(Error::illegal_member(
                    "annotation",
                    other.to_string(),
                    "a non-class type",
                ));
            }
        }
        if self.type_name.is_nullable() {
            return Err(Error::illegal_member(
                "annotation",
                self.type_name.to_string(),
                "a nullable type",
            ));
        }
        Ok(AnnotationSpec {
            type_name: self.type_name,
            members: self.members,
            use_site_target: self.use_site_target,
        })
    }
}
