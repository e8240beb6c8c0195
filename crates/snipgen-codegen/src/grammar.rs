//! Target grammar: the lexical rules a target contributes to the shared
//! compilers.
//!
//! The body and header compilers own all branching on body mode and entry
//! state. A target only says how its language spells string literals,
//! payload bindings, multipart fields and header entries.

use snipgen_types::BodyMode;

use crate::fragment::CodeBlock;
use crate::sanitize::{sanitize, Escape, JsonDialect};

/// How a grammar quotes plain string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

/// A multipart file field, every text part already escaped for the
/// grammar's form context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileField<'a> {
    /// 1-based position among the file fields of the body.
    pub index: usize,
    pub key: &'a str,
    pub path: &'a str,
    /// Last path component, used as the upload file name.
    pub name: &'a str,
}

pub trait Grammar {
    fn quote_style(&self) -> Quote;

    /// Dialect raw JSON literals are transcoded into.
    fn json_dialect(&self) -> JsonDialect {
        JsonDialect::Json
    }

    /// Context for plain string literals.
    fn string_escape(&self) -> Escape {
        match self.quote_style() {
            Quote::Single => Escape::Header,
            Quote::Double => Escape::DoubleQuoted,
        }
    }

    fn header_escape(&self) -> Escape {
        self.string_escape()
    }

    fn form_escape(&self) -> Escape {
        match self.quote_style() {
            Quote::Single => Escape::FormData,
            Quote::Double => Escape::DoubleQuoted,
        }
    }

    fn file_escape(&self) -> Escape {
        match self.quote_style() {
            Quote::Single => Escape::File,
            Quote::Double => Escape::DoubleQuoted,
        }
    }

    fn url_escape(&self) -> Escape {
        match self.quote_style() {
            Quote::Single => Escape::Header,
            Quote::Double => Escape::Url,
        }
    }

    /// Wrap already-escaped text in string quotes.
    fn quote(&self, escaped: &str) -> String {
        match self.quote_style() {
            Quote::Single => format!("'{escaped}'"),
            Quote::Double => format!("\"{escaped}\""),
        }
    }

    /// Escape and quote arbitrary text as a plain string literal.
    fn string_literal(&self, text: &str) -> String {
        self.quote(&sanitize(text, self.string_escape(), false))
    }

    // ── Body ────────────────────────────────────────────────────────────────

    /// Variable the body code binds for `mode`.
    fn payload_symbol(&self, mode: BodyMode) -> &'static str;

    /// Bind a complete string literal (raw, urlencoded, file placeholder) to
    /// the payload symbol.
    fn payload_statement(&self, mode: BodyMode, literal: &str) -> CodeBlock;

    /// Whether multipart file fields read the local filesystem. Browser
    /// targets attach a picked file instead.
    fn reads_files(&self) -> bool {
        true
    }

    fn form_open(&self) -> CodeBlock;

    /// One text field; `key` and `value` are escaped.
    fn form_text_field(&self, key: &str, value: &str) -> CodeBlock;

    /// One file field, including the generated program's error branch when
    /// the file cannot be opened.
    fn form_file_field(&self, field: FileField<'_>) -> CodeBlock;

    fn form_close(&self) -> CodeBlock;

    // ── Headers ─────────────────────────────────────────────────────────────

    /// One header entry; `key` and `value` are escaped.
    fn header_entry(&self, key: &str, value: &str) -> String;

    /// Text placed after every header entry but the last.
    fn header_separator(&self) -> &'static str {
        ""
    }

    /// Nesting of entries inside the header block.
    fn header_depth(&self) -> usize {
        0
    }

    fn header_open(&self) -> CodeBlock {
        CodeBlock::new()
    }

    fn header_close(&self) -> CodeBlock {
        CodeBlock::new()
    }
}
