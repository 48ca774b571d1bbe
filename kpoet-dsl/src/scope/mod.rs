//! Builder scopes.
//!
//! A scope owns one in-progress kpoet builder and is handed to a
//! configuration closure as `&mut Scope`. When the closure returns `Ok`, the
//! scope is consumed and the builder's `build()` produces the spec. When the
//! closure fails, the scope is dropped with everything configured so far.
//!
//! - [`BuilderScope`] - Trait implemented by every scope
//! - [`CodeAppend`] - Text appending, including the control-flow bracket
//! - [`CodeView`] - Borrowed code scope over a documentation or body buffer

mod annotation;
mod code;
mod file;
mod fun;
mod parameter;
mod property;
mod type_alias;
mod type_scope;

pub use annotation::AnnotationScope;
pub use code::{CodeAppend, CodeBlockScope, CodeView};
pub use file::FileScope;
pub use fun::FunScope;
pub use parameter::ParameterScope;
pub use property::PropertyScope;
pub use type_alias::TypeAliasScope;
pub use type_scope::TypeScope;

use kpoet::Result;
use tracing::{debug, trace};

/// A transient receiver that configures one spec before it is committed.
pub trait BuilderScope: Sized {
    /// The spec this scope produces.
    type Spec;

    /// Short label used in logs, e.g. `"fun"`.
    const KIND: &'static str;

    /// Name of the spec being configured, if it has one.
    fn spec_name(&self) -> Option<&str>;

    /// Close the scope and build the spec.
    fn finish(self) -> Result<Self::Spec>;
}

/// Run `configure` against `scope`, then close it.
///
/// Failures from either step discard the partially configured spec.
pub fn run<S, F>(mut scope: S, configure: F) -> Result<S::Spec>
where
    S: BuilderScope,
    F: FnOnce(&mut S) -> Result<()>,
{
    let name = scope.spec_name().unwrap_or("<anonymous>").to_string();
    trace!(scope = S::KIND, name = %name, "scope opened");

    let outcome = configure(&mut scope).and_then(|()| scope.finish());
    match &outcome {
        Ok(_) => trace!(scope = S::KIND, name = %name, "scope closed"),
        Err(err) => debug!(
            scope = S::KIND,
            name = %name,
            error = %err,
            "configuration failed, discarding partial spec"
        ),
    }
    outcome
}
