use std::ops::Range;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for kpoet operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid format string: {message}")]
    #[diagnostic(
        code(kpoet::format),
        help("placeholders are %L, %S, %N, %T, %%, %> and %<, optionally indexed like %1L")
    )]
    Format {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(code(kpoet::invalid_name), help("{reason}"))]
    InvalidName {
        name: String,
        context: String,
        reason: String,
    },

    #[error("{kind} '{name}' cannot have {member}")]
    #[diagnostic(code(kpoet::illegal_member))]
    IllegalMember {
        kind: String,
        name: String,
        member: String,
    },

    #[error("abstract function '{name}' cannot have a body")]
    #[diagnostic(
        code(kpoet::abstract_with_body),
        help("remove the abstract modifier or drop the body statements")
    )]
    AbstractWithBody { name: String },

    #[error("unbalanced control flow: {detail}")]
    #[diagnostic(
        code(kpoet::unbalanced_flow),
        help("every begin_control_flow needs a matching end_control_flow")
    )]
    UnbalancedFlow { detail: String },

    #[error("failed to parse render options")]
    #[diagnostic(code(kpoet::config))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create a format error pointing at `span` inside `format`.
    pub fn format(format: &str, span: Range<usize>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Format {
            src: NamedSource::new("format", format.to_string()),
            span: SourceSpan::from(span),
            message: message.into(),
        })
    }

    /// Create an invalid name error
    pub fn invalid_name(
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::InvalidName {
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create an illegal member error
    pub fn illegal_member(
        kind: impl Into<String>,
        name: impl Into<String>,
        member: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::IllegalMember {
            kind: kind.into(),
            name: name.into(),
            member: member.into(),
        })
    }

    /// Create an unbalanced control flow error
    pub fn unbalanced_flow(detail: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnbalancedFlow {
            detail: detail.into(),
        })
    }

    /// Create a config error from a toml error with source context
    pub fn config(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Config {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}

/// Check that `name` can be used as a declaration name.
///
/// Keywords are allowed: they are escaped with backticks when rendered.
pub(crate) fn check_name(name: &str, context: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_name(name, context, "names cannot be empty"));
    }
    if name.contains(['\n', '\r', '`']) {
        return Err(Error::invalid_name(
            name,
            context,
            "names cannot contain line breaks or backticks",
        ));
    }
    Ok(())
}
