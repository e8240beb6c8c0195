//! Header compiler.

use snipgen_types::{BodyMode, Header, Request};
use tracing::trace;

use crate::fragment::{CodeBlock, HeaderFragment};
use crate::grammar::Grammar;
use crate::sanitize::sanitize;

/// Enabled headers of `request` in order, plus a synthesized
/// `Content-Type: text/plain` when the body is a file and no enabled
/// `Content-Type` header exists. The request itself is left untouched.
pub fn effective_headers(request: &Request) -> Vec<Header> {
    let mut headers: Vec<Header> = request.header.iter().filter(|h| !h.disabled).cloned().collect();
    if request.body_mode() == BodyMode::File && !request.has_header("Content-Type") {
        headers.push(Header::new("Content-Type", "text/plain"));
    }
    headers
}

/// Compile enabled headers into entries. Keys are always trimmed and values
/// never are. Entries whose key is empty after trimming are dropped.
pub fn compile_headers<G: Grammar + ?Sized>(grammar: &G, headers: &[Header]) -> HeaderFragment {
    let escape = grammar.header_escape();
    let entries: Vec<String> = headers
        .iter()
        .filter(|h| !h.disabled)
        .filter_map(|h| {
            let key = sanitize(h.key.as_deref(), escape, true);
            if key.is_empty() {
                return None;
            }
            let value = sanitize(h.value.as_deref(), escape, false);
            Some(grammar.header_entry(&key, &value))
        })
        .collect();
    trace!(count = entries.len(), "compiled headers");
    HeaderFragment::new(entries)
}

/// The grammar's full header block for `headers`, empty when there are none.
pub fn header_block<G: Grammar + ?Sized>(grammar: &G, headers: &HeaderFragment) -> CodeBlock {
    headers.block(
        &grammar.header_open(),
        grammar.header_separator(),
        grammar.header_depth(),
        &grammar.header_close(),
    )
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{FileField, Quote};
    use snipgen_types::{Body, FileRef, Url};

    struct Pairs;

    impl Grammar for Pairs {
        fn quote_style(&self) -> Quote {
            Quote::Single
        }

        fn payload_symbol(&self, _mode: BodyMode) -> &'static str {
            "p"
        }

        fn payload_statement(&self, _mode: BodyMode, literal: &str) -> CodeBlock {
            CodeBlock::new().line(0, literal)
        }

        fn form_open(&self) -> CodeBlock {
            CodeBlock::new()
        }

        fn form_text_field(&self, _key: &str, _value: &str) -> CodeBlock {
            CodeBlock::new()
        }

        fn form_file_field(&self, _field: FileField<'_>) -> CodeBlock {
            CodeBlock::new()
        }

        fn form_close(&self) -> CodeBlock {
            CodeBlock::new()
        }

        fn header_entry(&self, key: &str, value: &str) -> String {
            format!("['{key}']['{value}']")
        }

        fn header_separator(&self) -> &'static str {
            ","
        }

        fn header_depth(&self) -> usize {
            1
        }

        fn header_open(&self) -> CodeBlock {
            CodeBlock::new().line(0, "{")
        }

        fn header_close(&self) -> CodeBlock {
            CodeBlock::new().line(0, "}")
        }
    }

    fn request() -> Request {
        Request::new("POST", Url::parse("https://example.com"))
    }

    #[test]
    fn keys_trimmed_values_untouched() {
        let fragment = compile_headers(&Pairs, &[Header::new("  a  ", "  b  ")]);
        assert_eq!(fragment.entries(), ["['a']['  b  ']"]);
    }

    #[test]
    fn disabled_headers_never_appear() {
        let headers = [
            Header::new("keep", "1"),
            Header::new("secret", "2").disabled(),
            Header::new("also", "3"),
        ];
        let fragment = compile_headers(&Pairs, &headers);
        assert_eq!(fragment.entries(), ["['keep']['1']", "['also']['3']"]);
    }

    #[test]
    fn single_quotes_are_escaped() {
        let fragment = compile_headers(&Pairs, &[Header::new("x", "it's")]);
        assert_eq!(fragment.entries(), [r"['x']['it\'s']"]);
    }

    #[test]
    fn empty_keys_are_dropped() {
        let mut missing = Header::new("", "v");
        missing.key = None;
        let fragment = compile_headers(&Pairs, &[missing, Header::new("   ", "v")]);
        assert!(fragment.is_empty());
    }

    #[test]
    fn no_headers_means_no_block() {
        let fragment = compile_headers(&Pairs, &[]);
        assert!(header_block(&Pairs, &fragment).is_empty());
    }

    #[test]
    fn block_wraps_entries() {
        let fragment = compile_headers(&Pairs, &[Header::new("a", "1"), Header::new("b", "2")]);
        assert_eq!(
            header_block(&Pairs, &fragment).render("  "),
            "{\n  ['a']['1'],\n  ['b']['2']\n}"
        );
    }

    #[test]
    fn file_body_gets_text_plain() {
        let req = request().with_body(Body::File(FileRef::default()));
        let headers = effective_headers(&req);
        assert_eq!(headers, vec![Header::new("Content-Type", "text/plain")]);
        assert!(req.header.is_empty());
    }

    #[test]
    fn explicit_content_type_wins() {
        let req = request()
            .with_header(Header::new("content-type", "application/pdf"))
            .with_body(Body::File(FileRef::default()));
        assert_eq!(effective_headers(&req), vec![Header::new("content-type", "application/pdf")]);
    }

    #[test]
    fn disabled_content_type_does_not_count() {
        let req = request()
            .with_header(Header::new("Content-Type", "application/pdf").disabled())
            .with_body(Body::File(FileRef::default()));
        assert_eq!(effective_headers(&req), vec![Header::new("Content-Type", "text/plain")]);
    }

    #[test]
    fn other_modes_get_no_injection() {
        let req = request().with_body(Body::Raw("x".into()));
        assert!(effective_headers(&req).is_empty());
    }
}
