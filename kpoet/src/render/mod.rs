//! Kotlin text rendering.
//!
//! Rendering runs through a [`CodeWriter`], which resolves type references
//! either standalone (default imports by simple name, everything else fully
//! qualified) or against the import table of a file.

mod imports;
mod writer;

pub use imports::Import;
pub(crate) use imports::ImportTable;
pub use writer::CodeWriter;
