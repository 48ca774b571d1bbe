//! Kotlin declaration modifiers.

use std::{collections::BTreeSet, fmt};

/// A Kotlin modifier keyword.
///
/// Variants are declared in Kotlin's recommended modifier order, so a
/// `BTreeSet<KModifier>` iterates in the order modifiers are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KModifier {
    Public,
    Protected,
    Private,
    Internal,
    Expect,
    Actual,
    Final,
    Open,
    Abstract,
    Sealed,
    Const,
    External,
    Override,
    Lateinit,
    Tailrec,
    Vararg,
    Suspend,
    Inner,
    Fun,
    Value,
    Inline,
    Noinline,
    Crossinline,
    Infix,
    Operator,
    Data,
}

impl KModifier {
    /// Get the Kotlin keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Expect => "expect",
            Self::Actual => "actual",
            Self::Final => "final",
            Self::Open => "open",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Const => "const",
            Self::External => "external",
            Self::Override => "override",
            Self::Lateinit => "lateinit",
            Self::Tailrec => "tailrec",
            Self::Vararg => "vararg",
            Self::Suspend => "suspend",
            Self::Inner => "inner",
            Self::Fun => "fun",
            Self::Value => "value",
            Self::Inline => "inline",
            Self::Noinline => "noinline",
            Self::Crossinline => "crossinline",
            Self::Infix => "infix",
            Self::Operator => "operator",
            Self::Data => "data",
        }
    }

    /// Check if this is a visibility modifier.
    pub fn is_visibility(&self) -> bool {
        matches!(
            self,
            Self::Public | Self::Protected | Self::Private | Self::Internal
        )
    }
}

impl fmt::Display for KModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Ordered, deduplicated modifier set.
pub type Modifiers = BTreeSet<KModifier>;

/// Insert a modifier, replacing any other visibility when `modifier` is one.
pub(crate) fn insert_modifier(modifiers: &mut Modifiers, modifier: KModifier) {
    if modifier.is_visibility() {
        modifiers.retain(|m| !m.is_visibility());
    }
    modifiers.insert(modifier);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let modifiers: Modifiers = [KModifier::Override, KModifier::Suspend, KModifier::Public]
            .into_iter()
            .collect();
        let rendered: Vec<_> = modifiers.iter().map(KModifier::keyword).collect();
        assert_eq!(rendered, ["public", "override", "suspend"]);
    }

    #[test]
    fn test_visibility_is_last_write_wins() {
        let mut modifiers = Modifiers::new();
        insert_modifier(&mut modifiers, KModifier::Private);
        insert_modifier(&mut modifiers, KModifier::Data);
        insert_modifier(&mut modifiers, KModifier::Internal);
        assert_eq!(
            modifiers.into_iter().collect::<Vec<_>>(),
            [KModifier::Internal, KModifier::Data]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(KModifier::Lateinit.to_string(), "lateinit");
    }
}
