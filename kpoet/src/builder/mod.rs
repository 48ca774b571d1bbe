//! Text building blocks used by the renderer.
//!
//! - [`CodeBuilder`] - Indentation-aware text buffer
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
