use std::{fmt, marker::PhantomData};

use kpoet::Arg;

use super::Keyed;

/// A reference to a spec added through an `adding_*` call.
///
/// The spec is committed when the `adding_*` call returns; the handle only
/// carries its name. Resolve it against the collection it was added to while
/// the collection is still open, or against the built parent afterwards.
/// As a format argument it renders as the name, so it can be used with `%N`.
pub struct SpecHandle<T> {
    name: String,
    spec: PhantomData<fn() -> T>,
}

impl<T> SpecHandle<T> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: PhantomData,
        }
    }

    /// The key the spec was added under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Keyed> SpecHandle<T> {
    /// Find the spec in a built collection, e.g. `type_spec.funs()`.
    ///
    /// When several specs share the name the last one is returned.
    pub fn resolve_in<'a>(&self, specs: &'a [T]) -> Option<&'a T> {
        specs.iter().rev().find(|spec| spec.key() == self.name)
    }
}

impl<T> Clone for SpecHandle<T> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl<T> PartialEq for SpecHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for SpecHandle<T> {}

impl<T> fmt::Debug for SpecHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SpecHandle").field(&self.name).finish()
    }
}

impl<T> From<&SpecHandle<T>> for Arg {
    fn from(handle: &SpecHandle<T>) -> Self {
        Arg::Text(handle.name.clone())
    }
}
