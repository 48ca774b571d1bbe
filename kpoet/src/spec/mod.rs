//! Immutable specs for Kotlin declarations and their builders.
//!
//! Every spec is built through a mutable builder whose `build()` validates
//! the result. Specs render Kotlin text through [`Display`](std::fmt::Display);
//! [`FileSpec::render`] additionally resolves imports.

use indexmap::IndexSet;

mod annotation;
mod file;
mod fun;
mod parameter;
mod property;
mod type_alias;
mod type_spec;

pub use annotation::{AnnotationSpec, AnnotationSpecBuilder, UseSiteTarget};
pub use file::{FileMember, FileSpec, FileSpecBuilder};
pub use fun::{ConstructorDelegate, FunKind, FunSpec, FunSpecBuilder};
pub use parameter::{ParameterSpec, ParameterSpecBuilder};
pub use property::{PropertySpec, PropertySpecBuilder};
pub use type_alias::{TypeAliasSpec, TypeAliasSpecBuilder};
pub use type_spec::{TypeKind, TypeSpec, TypeSpecBuilder};

/// First name that occurs twice, in declaration order.
pub(crate) fn first_duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = IndexSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}
