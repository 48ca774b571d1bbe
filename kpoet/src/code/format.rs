//! Format-string engine for code blocks.
//!
//! Formats are parsed eagerly: a malformed format or a mismatched argument
//! list fails before anything is appended to a builder.

use super::{Arg, CodePart};
use crate::{
    error::{Error, Result},
    types::TypeName,
};

/// Kotlin hard keywords, escaped with backticks by `%N`.
const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Addressing {
    Relative,
    Positional,
}

/// Parse `format` against `args` into code parts.
pub(crate) fn parse(format: &str, args: Vec<Arg>) -> Result<Vec<CodePart>> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut addressing = None;
    let mut next_relative = 0usize;
    let mut used = vec![false; args.len()];

    let mut chars = format.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c != '%' {
            text.push(c);
            continue;
        }

        let mut digits = String::new();
        while let Some(&(_, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }

        let Some((end, kind)) = chars.next() else {
            return Err(Error::format(
                format,
                start..format.len(),
                "dangling '%' at end of format string",
            ));
        };
        let span = start..end + kind.len_utf8();

        match kind {
            '%' | '>' | '<' if !digits.is_empty() => {
                return Err(Error::format(
                    format,
                    span,
                    format!("'%{}' cannot be indexed", kind),
                ));
            }
            '%' => {
                text.push('%');
                continue;
            }
            '>' | '<' => {
                flush(&mut text, &mut parts);
                parts.push(if kind == '>' {
                    CodePart::Indent
                } else {
                    CodePart::Unindent
                });
                continue;
            }
            'L' | 'S' | 'N' | 'T' => {}
            other => {
                return Err(Error::format(
                    format,
                    span,
                    format!("unknown placeholder '%{}'", other),
                ));
            }
        }

        let this_addressing = if digits.is_empty() {
            Addressing::Relative
        } else {
            Addressing::Positional
        };
        match addressing {
            None => addressing = Some(this_addressing),
            Some(existing) if existing != this_addressing => {
                return Err(Error::format(
                    format,
                    span,
                    "cannot mix relative and positional placeholders",
                ));
            }
            Some(_) => {}
        }

        let index = match this_addressing {
            Addressing::Relative => {
                let index = next_relative;
                next_relative += 1;
                if index >= args.len() {
                    return Err(Error::format(
                        format,
                        span,
                        format!("missing argument for placeholder '%{}'", kind),
                    ));
                }
                index
            }
            Addressing::Positional => {
                let position: usize = digits.parse().unwrap_or(0);
                if position == 0 || position > args.len() {
                    return Err(Error::format(
                        format,
                        span,
                        format!(
                            "index {} is out of range for {} argument(s)",
                            position,
                            args.len()
                        ),
                    ));
                }
                position - 1
            }
        };
        used[index] = true;

        match (kind, &args[index]) {
            ('L', Arg::Text(value)) => text.push_str(value),
            ('L' | 'S', Arg::Null) => text.push_str("null"),
            ('L', Arg::Type(ty)) => {
                flush(&mut text, &mut parts);
                parts.push(CodePart::Type(ty.clone()));
            }
            ('L', Arg::Code(code)) => {
                flush(&mut text, &mut parts);
                parts.extend(code.parts().iter().cloned());
            }
            ('S', Arg::Text(value)) => text.push_str(&quote(value)),
            ('N', Arg::Text(value)) => text.push_str(&escape_name(value)),
            ('T', Arg::Type(ty)) => {
                flush(&mut text, &mut parts);
                parts.push(CodePart::Type(ty.clone()));
            }
            (kind, arg) => {
                return Err(Error::format(
                    format,
                    span,
                    format!("'%{}' cannot format {}", kind, arg.describe()),
                ));
            }
        }
    }

    if let Some(unused) = used.iter().position(|u| !u) {
        let message = match addressing {
            Some(Addressing::Positional) => format!("argument {} is unused", unused + 1),
            _ => format!("{} unused argument(s)", args.len() - next_relative),
        };
        return Err(Error::format(format, 0..format.len(), message));
    }

    flush(&mut text, &mut parts);
    Ok(parts)
}

fn flush(text: &mut String, parts: &mut Vec<CodePart>) {
    if !text.is_empty() {
        parts.push(CodePart::Text(std::mem::take(text)));
    }
}

/// Render a Kotlin string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '$' => out.push_str("\\$"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Escape an identifier with backticks when it is a hard keyword.
pub fn escape_name(name: &str) -> String {
    let plain = name.chars().all(|c| c.is_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if HARD_KEYWORDS.contains(&name) || !plain {
        format!("`{}`", name)
    } else {
        name.to_string()
    }
}

impl Arg {
    fn describe(&self) -> &'static str {
        match self {
            Arg::Text(_) => "text",
            Arg::Null => "null",
            Arg::Type(TypeName::Star) => "a star projection",
            Arg::Type(_) => "a type",
            Arg::Code(_) => "a code block",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, code::CodeBlock, types::TypeName};

    fn text(parts: &[CodePart]) -> String {
        parts
            .iter()
            .map(|p| match p {
                CodePart::Text(t) => t.clone(),
                CodePart::Type(t) => format!("<{}>", t),
                CodePart::Indent => "⇥".to_string(),
                CodePart::Unindent => "⇤".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_literal_and_string() {
        let parts = parse("val %L = %S", args!["name", "Car"]).unwrap();
        assert_eq!(text(&parts), "val name = \"Car\"");
    }

    #[test]
    fn test_positional() {
        let parts = parse("%2L + %1L + %2L", args![1, 2]).unwrap();
        assert_eq!(text(&parts), "2 + 1 + 2");
    }

    #[test]
    fn test_type_placeholder() {
        let parts = parse("val x: %T", args![TypeName::int()]).unwrap();
        assert_eq!(
            parts,
            vec![
                CodePart::Text("val x: ".into()),
                CodePart::Type(TypeName::int())
            ]
        );
    }

    #[test]
    fn test_name_escapes_keywords() {
        let parts = parse("%N.%N", args!["in", "speed"]).unwrap();
        assert_eq!(text(&parts), "`in`.speed");
    }

    #[test]
    fn test_nested_code_is_inlined() {
        let inner = CodeBlock::of("%S", args!["x"]).unwrap();
        let parts = parse("println(%L)", args![inner]).unwrap();
        assert_eq!(text(&parts), "println(\"x\")");
    }

    #[test]
    fn test_percent_and_indent() {
        let parts = parse("100%%%>", args![]).unwrap();
        assert_eq!(parts, vec![CodePart::Text("100%".into()), CodePart::Indent]);
    }

    #[test]
    fn test_null_string() {
        let parts = parse("return %S", args![None::<&str>]).unwrap();
        assert_eq!(text(&parts), "return null");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b\\c\n$d"), "\"a\\\"b\\\\c\\n\\$d\"");
    }

    #[test]
    fn test_escape_name() {
        assert_eq!(escape_name("when"), "`when`");
        assert_eq!(escape_name("has space"), "`has space`");
        assert_eq!(escape_name("wheels"), "wheels");
    }

    #[test]
    fn test_missing_argument() {
        let err = parse("%L and %L", args![1]).unwrap_err();
        assert!(err.to_string().contains("missing argument"));
    }

    #[test]
    fn test_unused_arguments() {
        let err = parse("%L", args![1, 2]).unwrap_err();
        assert!(err.to_string().contains("1 unused argument"));

        let err = parse("%2L", args![1, 2]).unwrap_err();
        assert!(err.to_string().contains("argument 1 is unused"));
    }

    #[test]
    fn test_mixed_addressing() {
        let err = parse("%L %1L", args![1]).unwrap_err();
        assert!(err.to_string().contains("cannot mix"));
    }

    #[test]
    fn test_out_of_range() {
        let err = parse("%3L", args![1]).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(parse("%0L", args![1]).is_err());
    }

    #[test]
    fn test_unknown_and_dangling() {
        assert!(parse("%Q", args![]).unwrap_err().to_string().contains("unknown"));
        assert!(parse("50%", args![]).unwrap_err().to_string().contains("dangling"));
    }

    #[test]
    fn test_type_mismatch() {
        let err = parse("%T", args!["String"]).unwrap_err();
        assert!(err.to_string().contains("'%T' cannot format text"));

        let err = parse("%S", args![TypeName::int()]).unwrap_err();
        assert!(err.to_string().contains("'%S' cannot format a type"));
    }

    #[test]
    fn test_error_span_points_at_placeholder() {
        let err = parse("return %Q", args![]).unwrap_err();
        match *err {
            Error::Format { span, .. } => {
                assert_eq!(span.offset(), 7);
                assert_eq!(span.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
