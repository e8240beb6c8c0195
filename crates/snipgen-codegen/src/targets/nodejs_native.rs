//! Node.js using the core `http`/`https` modules.

use snipgen_types::BodyMode;

use super::{join_members, section, MULTIPART_BOUNDARY};
use crate::fragment::CodeBlock;
use crate::grammar::{FileField, Grammar, Quote};
use crate::headers::header_block;
use crate::options::OptionDescriptor;
use crate::target::{Emission, Target};

pub struct NodejsNative;

/// `parts.push(Buffer.from('--' + boundary + '<rest>'));`
fn push_part_head(rest: &str) -> String {
    format!("parts.push(Buffer.from('--' + boundary + '{rest}'));")
}

impl Grammar for NodejsNative {
    fn quote_style(&self) -> Quote {
        Quote::Single
    }

    fn payload_symbol(&self, _mode: BodyMode) -> &'static str {
        "postData"
    }

    fn payload_statement(&self, _mode: BodyMode, literal: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("const postData = {literal};"))
    }

    fn form_open(&self) -> CodeBlock {
        CodeBlock::new()
            .line(0, format!("const boundary = '{MULTIPART_BOUNDARY}';"))
            .line(0, "const parts = [];")
    }

    fn form_text_field(&self, key: &str, value: &str) -> CodeBlock {
        CodeBlock::new().line(
            0,
            push_part_head(&format!(
                "\\r\\nContent-Disposition: form-data; name=\"{key}\"\\r\\n\\r\\n{value}\\r\\n"
            )),
        )
    }

    fn form_file_field(&self, field: FileField<'_>) -> CodeBlock {
        let FileField {
            index,
            key,
            path,
            name,
        } = field;
        CodeBlock::new()
            .line(0, format!("let file{index};"))
            .line(0, "try {")
            .line(1, format!("file{index} = fs.readFileSync('{path}');"))
            .line(0, "} catch (err) {")
            .line(1, format!("console.error('Cannot read file {path}', err);"))
            .line(1, "process.exit(1);")
            .line(0, "}")
            .line(
                0,
                push_part_head(&format!(
                    "\\r\\nContent-Disposition: form-data; name=\"{key}\"; filename=\"{name}\"\\r\\nContent-Type: application/octet-stream\\r\\n\\r\\n"
                )),
            )
            .line(0, format!("parts.push(file{index});"))
            .line(0, "parts.push(Buffer.from('\\r\\n'));")
    }

    fn form_close(&self) -> CodeBlock {
        CodeBlock::new()
            .line(0, push_part_head("--\\r\\n"))
            .line(0, "const postData = Buffer.concat(parts);")
    }

    fn header_entry(&self, key: &str, value: &str) -> String {
        format!("'{key}': '{value}'")
    }

    fn header_separator(&self) -> &'static str {
        ","
    }

    fn header_depth(&self) -> usize {
        1
    }

    fn header_open(&self) -> CodeBlock {
        CodeBlock::new().line(0, "'headers': {")
    }

    fn header_close(&self) -> CodeBlock {
        CodeBlock::new().line(0, "}")
    }
}

impl Target for NodejsNative {
    fn id(&self) -> &'static str {
        "nodejs-native"
    }

    fn label(&self) -> &'static str {
        "NodeJs - Native"
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        OptionDescriptor::standard()
    }

    fn assemble(&self, e: &Emission<'_>) -> String {
        let url = &e.request.url;
        let timeout = e.options.request_timeout();
        let follow = e.options.follow_redirect();
        let module = if url.protocol_or_default() == "http" {
            "http"
        } else {
            "https"
        };

        let mut code = CodeBlock::new();
        if follow {
            code.push(0, format!("const {module} = require('follow-redirects').{module};"));
        } else {
            code.push(0, format!("const {module} = require('{module}');"));
        }
        if e.body.needs_file_io {
            code.push(0, "const fs = require('fs');");
        }
        code.blank();

        let mut headers = e.headers.clone();
        if e.body.needs_multipart {
            headers.push(format!(
                "'Content-Type': 'multipart/form-data; boundary={MULTIPART_BOUNDARY}'"
            ));
        }
        let mut members = vec![
            CodeBlock::new().line(0, format!("'method': {}", self.string_literal(&e.request.method))),
            CodeBlock::new().line(0, format!("'hostname': {}", self.string_literal(&url.hostname()))),
        ];
        if let Some(port) = url.port() {
            members.push(CodeBlock::new().line(0, format!("'port': {}", self.string_literal(&port))));
        }
        members.push(
            CodeBlock::new().line(0, format!("'path': {}", self.string_literal(&url.path_and_query()))),
        );
        members.push(header_block(self, &headers));
        if follow {
            members.push(CodeBlock::new().line(0, "'maxRedirects': 20"));
        }
        code.push(0, "const options = {");
        code.append(&join_members(members, ",", 1), 0);
        code.push(0, "};");
        code.blank();

        code.push(0, format!("const req = {module}.request(options, (res) => {{"));
        code.push(1, "const chunks = [];");
        code.blank();
        code.push(1, "res.on('data', (chunk) => {");
        code.push(2, "chunks.push(chunk);");
        code.push(1, "});");
        code.blank();
        code.push(1, "res.on('end', () => {");
        code.push(2, "const body = Buffer.concat(chunks);");
        code.push(2, "console.log(body.toString());");
        code.push(1, "});");
        code.blank();
        code.push(1, "res.on('error', (error) => {");
        code.push(2, "console.error(error);");
        code.push(1, "});");
        code.push(0, "});");
        code.blank();

        section(&mut code, &e.body.code, 0);
        if let Some(payload) = e.body.payload {
            if e.request.method == "DELETE" {
                code.push(0, format!("req.setHeader('Content-Length', Buffer.byteLength({payload}));"));
                code.blank();
            }
        }
        if timeout > 0 {
            code.push(0, format!("req.setTimeout({timeout}, () => {{"));
            code.push(1, "req.destroy(new Error('Request timed out'));");
            code.push(0, "});");
            code.blank();
        }
        if let Some(payload) = e.body.payload {
            code.push(0, format!("req.write({payload});"));
            code.blank();
        }
        code.push(0, "req.end();");
        code.render(&e.indent)
    }
}
