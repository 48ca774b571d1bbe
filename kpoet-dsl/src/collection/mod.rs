//! Spec collections.
//!
//! Collections are views over storage owned by a kpoet builder. A view is
//! taken from a scope (`fun_scope.parameters()`, `type_scope.funs()`, ...),
//! holds a mutable borrow of that storage for as long as it lives and
//! forwards every insertion to it.
//!
//! - [`SpecList`] - Ordered collection, insertion order is iteration order
//! - [`SpecMap`] - Name-keyed collection, the last write under a key wins
//! - [`SpecHandle`] - Name of an entry added through an `adding_*` call

mod handle;
mod list;
mod map;

pub use handle::SpecHandle;
pub use list::SpecList;
pub use map::SpecMap;

use kpoet::{FileMember, FunSpec, ParameterSpec, PropertySpec, TypeAliasSpec, TypeSpec};

/// A spec identified by its declared name.
pub trait Keyed {
    /// The name used for lookups. Unnamed specs use `""`.
    fn key(&self) -> &str;
}

impl Keyed for ParameterSpec {
    fn key(&self) -> &str {
        self.name()
    }
}

impl Keyed for PropertySpec {
    fn key(&self) -> &str {
        self.name()
    }
}

impl Keyed for FunSpec {
    fn key(&self) -> &str {
        self.name()
    }
}

impl Keyed for TypeSpec {
    fn key(&self) -> &str {
        self.name().unwrap_or_default()
    }
}

impl Keyed for TypeAliasSpec {
    fn key(&self) -> &str {
        self.name()
    }
}

impl Keyed for FileMember {
    fn key(&self) -> &str {
        self.name().unwrap_or_default()
    }
}
