//! Builder scopes and spec collections for assembling kpoet specs.
//!
//! Specs are configured inside closures that receive a scope. Scopes set
//! attributes on the in-progress spec and hand out collection views for its
//! children, so nested declarations read in the same shape as the Kotlin
//! they produce:
//!
//! ```
//! use kpoet_dsl::{build_class, kpoet::{KModifier, TypeName, args}, scope::CodeAppend};
//!
//! let car = build_class("Car", |car| {
//!     car.properties().add_property("wheels", TypeName::int(), |p| {
//!         p.initializer("%L", args![4])?;
//!         Ok(())
//!     })?;
//!     car.funs().add_fun("honk", |f| {
//!         f.add_modifier(KModifier::Open);
//!         f.append_line("println(%S)", args!["Beep"])?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(
//!     car.to_string(),
//!     "class Car {\n  val wheels: Int = 4\n\n  open fun honk() {\n    println(\"Beep\")\n  }\n}\n"
//! );
//! ```
//!
//! A configuration closure that returns an error discards its spec; nothing
//! is added to the parent collection.
//!
//! # Module Organization
//!
//! - [`scope`] - Builder scopes and the code-appending surface
//! - [`collection`] - List and map views, deferred handles
//! - [`entry`] - `build_*` functions opening a top-level scope

pub mod collection;
pub mod entry;
pub mod scope;

pub use collection::{Keyed, SpecHandle, SpecList, SpecMap};
pub use entry::{
    build_annotation, build_annotation_class, build_class, build_code_block, build_constructor,
    build_enum, build_file, build_fun, build_interface, build_object, build_parameter,
    build_property, build_type_alias,
};
pub use kpoet;
pub use scope::{BuilderScope, CodeAppend};
