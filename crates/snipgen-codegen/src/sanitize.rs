//! String sanitizer.
//!
//! [`sanitize`] escapes raw text for embedding inside a string literal of
//! the generated program. The escaping rule depends on the lexical context
//! the text lands in ([`Escape`]). The function is pure: the same input,
//! context and trim flag always give the same output.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

/// Bytes percent-encoded in URL-encoded body values: everything outside the
/// RFC 3986 unreserved set.
const URLENCODED_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Lexical context a sanitized string is embedded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Escape {
    /// Whole raw body: a complete double-quoted JSON string literal.
    Raw,
    /// `application/x-www-form-urlencoded` key or value.
    UrlEncoded,
    /// Multipart field name or text value (single-quoted literal).
    FormData,
    /// File path inside a single-quoted literal.
    File,
    /// Header key or value inside a single-quoted literal.
    Header,
    /// Request URL inside a double-quoted literal.
    Url,
    /// Any other text inside a double-quoted literal.
    DoubleQuoted,
}

/// Escape `input` for `context`, trimming surrounding whitespace first when
/// `trim` is set. Missing input yields the empty string.
pub fn sanitize<'a>(input: impl Into<Option<&'a str>>, context: Escape, trim: bool) -> String {
    let Some(input) = input.into() else {
        return String::new();
    };
    let input = if trim { input.trim() } else { input };
    match context {
        Escape::Raw => Value::String(input.to_owned()).to_string(),
        Escape::UrlEncoded => utf8_percent_encode(input, URLENCODED_VALUE).to_string(),
        Escape::FormData | Escape::File | Escape::Header => {
            input.replace('\\', "\\\\").replace('\'', "\\'")
        }
        Escape::Url | Escape::DoubleQuoted => input.replace('\\', "\\\\").replace('"', "\\\""),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// JSON literal dialects
// ══════════════════════════════════════════════════════════════════════════════

/// How a target language spells the escapes a JSON string literal uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonDialect {
    /// Accepts JSON escapes as-is (Go, JavaScript).
    Json,
    /// `\u{…}` unicode escapes, no `\b` or `\f`.
    Swift,
    /// No `\u` below U+00A0: octal escapes instead.
    C,
    /// Double-quoted PHP: `\u{…}`, no `\b`, and `$` interpolates.
    Php,
}

/// Rewrite a double-quoted JSON string literal into `dialect`.
pub fn transcode_json_literal(literal: &str, dialect: JsonDialect) -> String {
    if dialect == JsonDialect::Json {
        return literal.to_string();
    }
    let mut out = String::with_capacity(literal.len() + 8);
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push('\\');
                    break;
                };
                match next {
                    'u' => {
                        let hex: String = chars.by_ref().take(4).collect();
                        match u32::from_str_radix(&hex, 16) {
                            Ok(code) => out.push_str(&unicode_escape(code, dialect)),
                            Err(_) => {
                                out.push_str("\\u");
                                out.push_str(&hex);
                            }
                        }
                    }
                    'b' if dialect != JsonDialect::C => out.push_str(&unicode_escape(0x08, dialect)),
                    'f' if dialect == JsonDialect::Swift => {
                        out.push_str(&unicode_escape(0x0c, dialect))
                    }
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            '$' if dialect == JsonDialect::Php => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

fn unicode_escape(code: u32, dialect: JsonDialect) -> String {
    match dialect {
        JsonDialect::Swift | JsonDialect::Php => format!("\\u{{{code:x}}}"),
        JsonDialect::C if code <= 0o377 => format!("\\{code:03o}"),
        JsonDialect::C | JsonDialect::Json => format!("\\u{code:04x}"),
    }
}

/// Last component of a path, accepting both separators.
pub fn file_name(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\')
        .find(|part| !part.is_empty())
        .unwrap_or(path)
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════
