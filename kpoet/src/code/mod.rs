//! Code blocks and their format arguments.
//!
//! - [`CodeBlock`] - Immutable fragment of Kotlin code
//! - [`CodeBlockBuilder`] - Appends formatted code, tracks control flow
//! - [`Arg`] - A format argument, usually created with [`args!`](crate::args)

mod block;
mod format;

pub use block::{CodeBlock, CodeBlockBuilder, CodePart};
pub use format::{escape_name, quote};

use crate::types::{ClassName, TypeName};

/// A format argument.
///
/// Placeholders decide how an argument is interpreted: the same text is a
/// literal under `%L`, a string literal under `%S` and an identifier under
/// `%N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Text (literals, strings, names).
    Text(String),
    /// `null`.
    Null,
    /// A type reference.
    Type(TypeName),
    /// A nested code block.
    Code(CodeBlock),
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// ```
/// use kpoet::{args, code::CodeBlock, types::TypeName};
///
/// let code = CodeBlock::of("val %N: %T = %L", args!["wheels", TypeName::int(), 4]).unwrap();
/// assert_eq!(code.to_string(), "val wheels: Int = 4");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::code::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::code::Arg::from($arg)),+]
    };
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

macro_rules! display_arg {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )+
    };
}

display_arg!(bool, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl From<TypeName> for Arg {
    fn from(value: TypeName) -> Self {
        Self::Type(value)
    }
}

impl From<&TypeName> for Arg {
    fn from(value: &TypeName) -> Self {
        Self::Type(value.clone())
    }
}

impl From<ClassName> for Arg {
    fn from(value: ClassName) -> Self {
        Self::Type(TypeName::Class(value))
    }
}

impl From<&ClassName> for Arg {
    fn from(value: &ClassName) -> Self {
        Self::Type(TypeName::from(value))
    }
}

impl From<CodeBlock> for Arg {
    fn from(value: CodeBlock) -> Self {
        Self::Code(value)
    }
}

impl From<&CodeBlock> for Arg {
    fn from(value: &CodeBlock) -> Self {
        Self::Code(value.clone())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
