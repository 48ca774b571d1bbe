//! Kotlin source specs and a renderer for them.
//!
//! This crate provides the object model that `kpoet-dsl` builds on:
//! immutable specs for Kotlin declarations, mutable builders that validate
//! them, a format-string engine for code bodies and a text renderer.
//!
//! # Module Organization
//!
//! - [`types`] - Type references and modifiers (ClassName, TypeName, KModifier)
//! - [`code`] - Code blocks and the `%L`/`%S`/`%N`/`%T` format engine
//! - [`spec`] - Declaration specs (TypeSpec, FunSpec, PropertySpec, FileSpec, etc.)
//! - [`render`] - Kotlin text rendering and import resolution
//! - [`builder`] - Indentation-aware text buffer
//! - [`config`] - Render options loaded from TOML

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
pub mod code;
pub mod config;
mod error;
pub mod render;
pub mod spec;
pub mod types;

pub use code::{Arg, CodeBlock, CodeBlockBuilder};
pub use config::RenderOptions;
pub use error::{Error, Result};
pub use spec::*;
pub use types::{ClassName, KModifier, TypeName, TypeVariable};
