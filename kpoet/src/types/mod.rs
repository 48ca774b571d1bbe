//! Type references and modifiers.

mod modifier;
mod name;

pub use modifier::{KModifier, Modifiers};
pub(crate) use modifier::insert_modifier;
pub use name::{ClassName, DEFAULT_IMPORTS, TypeName, TypeVariable, Variance};
