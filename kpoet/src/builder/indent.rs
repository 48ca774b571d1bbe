//! Indentation configuration for rendered Kotlin.

use serde::Deserialize;

const SPACES: &str = "                ";

/// Indentation style for rendered code.
///
/// Deserializes from a width (`indent = 4`) or from `"tab"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndentRepr")]
pub enum Indent {
    /// `n` spaces per level, capped at 16.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation, the kpoet default.
    pub const KOTLIN: Self = Self::Spaces(2);

    /// 4-space indentation (Kotlin style guide, IntelliJ default).
    pub const WIDE: Self = Self::Spaces(4);

    /// Tab indentation.
    pub const TAB: Self = Self::Tab;

    /// Text written for one nesting level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(width) => &SPACES[..usize::from(*width).min(SPACES.len())],
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::KOTLIN
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IndentRepr {
    Width(u8),
    Named(String),
}

impl TryFrom<IndentRepr> for Indent {
    type Error = String;

    fn try_from(repr: IndentRepr) -> Result<Self, Self::Error> {
        match repr {
            IndentRepr::Width(0) => Err("indent width must be at least 1".to_string()),
            IndentRepr::Width(width) => Ok(Self::Spaces(width)),
            IndentRepr::Named(name) if name.eq_ignore_ascii_case("tab") => Ok(Self::Tab),
            IndentRepr::Named(name) => Err(format!(
                "unknown indent '{}', expected a width or \"tab\"",
                name
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::KOTLIN.as_str(), "  ");
        assert_eq!(Indent::Spaces(6).as_str(), "      ");
        assert_eq!(Indent::Spaces(40).as_str().len(), 16);
        assert_eq!(Indent::Tab.as_str(), "\t");
    }

    #[test]
    fn test_indent_constants() {
        assert_eq!(Indent::KOTLIN, Indent::Spaces(2));
        assert_eq!(Indent::WIDE, Indent::Spaces(4));
        assert_eq!(Indent::TAB, Indent::Tab);
    }

    #[test]
    fn test_default() {
        assert_eq!(Indent::default(), Indent::KOTLIN);
    }

    #[test]
    fn test_try_from_repr() {
        assert_eq!(Indent::try_from(IndentRepr::Width(4)), Ok(Indent::Spaces(4)));
        assert_eq!(
            Indent::try_from(IndentRepr::Named("TAB".into())),
            Ok(Indent::Tab)
        );
        assert!(Indent::try_from(IndentRepr::Width(0)).is_err());
        assert!(Indent::try_from(IndentRepr::Named("spaces".into())).is_err());
    }
}
