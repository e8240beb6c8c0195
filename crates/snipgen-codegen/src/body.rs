//! Body compiler.
//!
//! Branches on the body mode and produces the code that builds the outgoing
//! payload, together with the metadata the assembler needs (payload symbol,
//! multipart and file-I/O imports). It never fails: disabled or malformed
//! entries are skipped, and a body with nothing left compiles to the empty
//! fragment.

use snipgen_types::{Body, BodyMode, FormParam, FormParamKind, UrlEncodedParam};
use tracing::trace;

use crate::fragment::{BodyFragment, CodeBlock};
use crate::grammar::{FileField, Grammar};
use crate::sanitize::{file_name, sanitize, transcode_json_literal, Escape};

/// Payload used when the whole body is a file. The path is never read at
/// generation time.
pub const FILE_PLACEHOLDER: &str = "<file contents here>";

/// Compile `body` for `grammar`, trimming body text when `trim` is set.
pub fn compile_body<G: Grammar + ?Sized>(grammar: &G, body: Option<&Body>, trim: bool) -> BodyFragment {
    let fragment = match body {
        None | Some(Body::Empty) => BodyFragment::empty(),
        Some(Body::Raw(text)) => {
            let literal = sanitize(text.as_str(), Escape::Raw, trim);
            let literal = transcode_json_literal(&literal, grammar.json_dialect());
            text_payload(grammar, BodyMode::Raw, &literal)
        }
        Some(Body::UrlEncoded(params)) => urlencoded(grammar, params, trim),
        Some(Body::FormData(params)) => formdata(grammar, params, trim),
        Some(Body::File(_)) => {
            let literal = grammar.quote(&sanitize(FILE_PLACEHOLDER, grammar.string_escape(), false));
            text_payload(grammar, BodyMode::File, &literal)
        }
    };
    trace!(
        mode = %fragment.mode,
        lines = fragment.code.len(),
        multipart = fragment.needs_multipart,
        file_io = fragment.needs_file_io,
        "compiled body"
    );
    fragment
}

fn text_payload<G: Grammar + ?Sized>(grammar: &G, mode: BodyMode, literal: &str) -> BodyFragment {
    BodyFragment {
        mode,
        code: grammar.payload_statement(mode, literal),
        payload: Some(grammar.payload_symbol(mode)),
        needs_multipart: false,
        needs_file_io: false,
    }
}

fn urlencoded<G: Grammar + ?Sized>(grammar: &G, params: &[UrlEncodedParam], trim: bool) -> BodyFragment {
    let pairs: Vec<String> = params
        .iter()
        .filter(|p| !p.disabled)
        .map(|p| {
            format!(
                "{}={}",
                sanitize(p.key.as_deref(), Escape::UrlEncoded, trim),
                sanitize(p.value.as_deref(), Escape::UrlEncoded, trim)
            )
        })
        .collect();
    if pairs.is_empty() {
        return BodyFragment::empty();
    }
    // Percent-encoded text needs no further escaping in any grammar.
    let literal = grammar.quote(&pairs.join("&"));
    text_payload(grammar, BodyMode::UrlEncoded, &literal)
}

fn formdata<G: Grammar + ?Sized>(grammar: &G, params: &[FormParam], trim: bool) -> BodyFragment {
    let escape = grammar.form_escape();
    let mut fields = CodeBlock::new();
    let mut files = 0;

    for param in params.iter().filter(|p| !p.disabled) {
        let key = sanitize(param.key.as_deref(), escape, trim);
        match param.kind {
            FormParamKind::Text => {
                let value = sanitize(param.value.as_deref(), escape, trim);
                fields.append(&grammar.form_text_field(&key, &value), 0);
            }
            FormParamKind::File => {
                let Some(src) = param.src.as_deref().filter(|s| !s.is_empty()) else {
                    continue;
                };
                files += 1;
                let path = sanitize(src, grammar.file_escape(), false);
                let name = sanitize(file_name(src), grammar.file_escape(), false);
                fields.append(
                    &grammar.form_file_field(FileField {
                        index: files,
                        key: &key,
                        path: &path,
                        name: &name,
                    }),
                    0,
                );
            }
        }
    }

    if fields.is_empty() {
        return BodyFragment::empty();
    }

    let mut code = grammar.form_open();
    code.append(&fields, 0);
    code.append(&grammar.form_close(), 0);
    BodyFragment {
        mode: BodyMode::FormData,
        code,
        payload: Some(grammar.payload_symbol(BodyMode::FormData)),
        needs_multipart: true,
        needs_file_io: files > 0 && grammar.reads_files(),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════
