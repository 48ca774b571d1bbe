//! Render options, loadable from TOML.

use serde::Deserialize;

use crate::{
    builder::Indent,
    error::{Error, Result},
};

/// Options for [`FileSpec::render_with`](crate::spec::FileSpec::render_with).
///
/// ```toml
/// indent = 4          # or "tab"
/// header = "Generated by kpoet. Do not edit."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Indentation per nesting level.
    pub indent: Indent,
    /// Comment written above the file, one `//` line per input line.
    pub header: Option<String>,
}

impl RenderOptions {
    /// Parse options from TOML, reporting errors against `filename`.
    pub fn from_toml_str(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e, content, filename))
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::from_toml_str("", "kpoet.toml").unwrap();
        assert_eq!(options, RenderOptions::default());
        assert_eq!(options.indent, Indent::KOTLIN);
    }

    #[test]
    fn test_parse() {
        let options =
            RenderOptions::from_toml_str("indent = 4\nheader = \"generated\"\n", "kpoet.toml")
                .unwrap();
        assert_eq!(options.indent, Indent::Spaces(4));
        assert_eq!(options.header.as_deref(), Some("generated"));

        let tabs = RenderOptions::from_toml_str("indent = \"tab\"", "kpoet.toml").unwrap();
        assert_eq!(tabs.indent, Indent::Tab);
    }

    #[test]
    fn test_invalid_options() {
        let err = RenderOptions::from_toml_str("indent = \"wide\"", "kpoet.toml").unwrap_err();
        assert!(matches!(*err, Error::Config { .. }));

        let err = RenderOptions::from_toml_str("colour = true", "kpoet.toml").unwrap_err();
        assert!(matches!(*err, Error::Config { .. }));
    }
}
