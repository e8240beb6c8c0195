//! JavaScript using jQuery `$.ajax`.

use snipgen_types::BodyMode;

use super::{join_members, section};
use crate::fragment::CodeBlock;
use crate::grammar::{FileField, Grammar, Quote};
use crate::headers::header_block;
use crate::options::OptionDescriptor;
use crate::sanitize::sanitize;
use crate::target::{Emission, Target};

pub struct JsJquery;

impl Grammar for JsJquery {
    fn quote_style(&self) -> Quote {
        Quote::Double
    }

    fn payload_symbol(&self, mode: BodyMode) -> &'static str {
        match mode {
            BodyMode::FormData => "form",
            _ => "payload",
        }
    }

    fn payload_statement(&self, _mode: BodyMode, literal: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("var payload = {literal};"))
    }

    fn reads_files(&self) -> bool {
        false
    }

    fn form_open(&self) -> CodeBlock {
        CodeBlock::new().line(0, "var form = new FormData();")
    }

    fn form_text_field(&self, key: &str, value: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("form.append(\"{key}\", \"{value}\");"))
    }

    fn form_file_field(&self, field: FileField<'_>) -> CodeBlock {
        CodeBlock::new()
            .line(0, "if (!fileInput.files[0]) {")
            .line(1, format!("throw new Error(\"Cannot read file {}\");", field.path))
            .line(0, "}")
            .line(
                0,
                format!(
                    "form.append(\"{}\", fileInput.files[0], \"{}\");",
                    field.key, field.name
                ),
            )
    }

    fn form_close(&self) -> CodeBlock {
        CodeBlock::new()
    }

    fn header_entry(&self, key: &str, value: &str) -> String {
        format!("\"{key}\": \"{value}\"")
    }

    fn header_separator(&self) -> &'static str {
        ","
    }

    fn header_depth(&self) -> usize {
        1
    }

    fn header_open(&self) -> CodeBlock {
        CodeBlock::new().line(0, "\"headers\": {")
    }

    fn header_close(&self) -> CodeBlock {
        CodeBlock::new().line(0, "}")
    }
}

impl Target for JsJquery {
    fn id(&self) -> &'static str {
        "javascript-jquery"
    }

    fn label(&self) -> &'static str {
        "JavaScript - jQuery"
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        vec![
            OptionDescriptor::indent_count(),
            OptionDescriptor::indent_type(),
            OptionDescriptor::request_timeout(),
            OptionDescriptor::trim_request_body(),
        ]
    }

    fn assemble(&self, e: &Emission<'_>) -> String {
        let timeout = e.options.request_timeout();
        let url = self.quote(&sanitize(e.request.url.to_string().as_str(), self.url_escape(), false));

        let mut code = CodeBlock::new();
        section(&mut code, &e.body.code, 0);

        let mut members = vec![
            CodeBlock::new().line(0, format!("\"url\": {url}")),
            CodeBlock::new().line(0, format!("\"method\": {}", self.string_literal(&e.request.method))),
        ];
        if timeout > 0 {
            members.push(CodeBlock::new().line(0, format!("\"timeout\": {timeout}")));
        }
        members.push(header_block(self, &e.headers));
        if e.body.needs_multipart {
            members.push(
                CodeBlock::new()
                    .line(0, "\"processData\": false,")
                    .line(0, "\"mimeType\": \"multipart/form-data\",")
                    .line(0, "\"contentType\": false"),
            );
        }
        if let Some(payload) = e.body.payload {
            members.push(CodeBlock::new().line(0, format!("\"data\": {payload}")));
        }
        code.push(0, "var settings = {");
        code.append(&join_members(members, ",", 1), 0);
        code.push(0, "};");
        code.blank();
        code.push(0, "$.ajax(settings).done(function (response) {");
        code.push(1, "console.log(response);");
        code.push(0, "});");
        code.render(&e.indent)
    }
}
