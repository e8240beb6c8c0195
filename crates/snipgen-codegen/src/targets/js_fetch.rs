//! JavaScript using the Fetch API.

use snipgen_types::BodyMode;

use super::{join_members, section};
use crate::fragment::CodeBlock;
use crate::grammar::{FileField, Grammar, Quote};
use crate::headers::header_block;
use crate::options::OptionDescriptor;
use crate::sanitize::sanitize;
use crate::target::{Emission, Target};

pub struct JsFetch;

impl Grammar for JsFetch {
    fn quote_style(&self) -> Quote {
        Quote::Double
    }

    fn payload_symbol(&self, mode: BodyMode) -> &'static str {
        match mode {
            BodyMode::UrlEncoded => "urlencoded",
            BodyMode::FormData => "formdata",
            BodyMode::File => "file",
            BodyMode::Raw | BodyMode::Empty => "raw",
        }
    }

    fn payload_statement(&self, mode: BodyMode, literal: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("const {} = {literal};", self.payload_symbol(mode)))
    }

    fn reads_files(&self) -> bool {
        false
    }

    fn form_open(&self) -> CodeBlock {
        CodeBlock::new().line(0, "const formdata = new FormData();")
    }

    fn form_text_field(&self, key: &str, value: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("formdata.append(\"{key}\", \"{value}\");"))
    }

    fn form_file_field(&self, field: FileField<'_>) -> CodeBlock {
        CodeBlock::new()
            .line(0, "if (!fileInput.files[0]) {")
            .line(1, format!("throw new Error(\"Cannot read file {}\");", field.path))
            .line(0, "}")
            .line(
                0,
                format!(
                    "formdata.append(\"{}\", fileInput.files[0], \"{}\");",
                    field.key, field.name
                ),
            )
    }

    fn form_close(&self) -> CodeBlock {
        CodeBlock::new()
    }

    fn header_entry(&self, key: &str, value: &str) -> String {
        format!("myHeaders.append(\"{key}\", \"{value}\");")
    }

    fn header_open(&self) -> CodeBlock {
        CodeBlock::new().line(0, "const myHeaders = new Headers();")
    }
}

impl Target for JsFetch {
    fn id(&self) -> &'static str {
        "javascript-fetch"
    }

    fn label(&self) -> &'static str {
        "JavaScript - Fetch"
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        OptionDescriptor::standard()
    }

    fn assemble(&self, e: &Emission<'_>) -> String {
        let timeout = e.options.request_timeout();
        let mut code = CodeBlock::new();
        section(&mut code, &header_block(self, &e.headers), 0);
        section(&mut code, &e.body.code, 0);

        let mut members = vec![CodeBlock::new().line(
            0,
            format!("method: {}", self.string_literal(&e.request.method)),
        )];
        if !e.headers.is_empty() {
            members.push(CodeBlock::new().line(0, "headers: myHeaders"));
        }
        if let Some(payload) = e.body.payload {
            members.push(CodeBlock::new().line(0, format!("body: {payload}")));
        }
        let redirect = if e.options.follow_redirect() {
            "follow"
        } else {
            "manual"
        };
        members.push(CodeBlock::new().line(0, format!("redirect: \"{redirect}\"")));
        code.push(0, "const requestOptions = {");
        code.append(&join_members(members, ",", 1), 0);
        code.push(0, "};");
        code.blank();

        let url = self.quote(&sanitize(e.request.url.to_string().as_str(), self.url_escape(), false));
        if timeout > 0 {
            code.push(0, "const timeoutPromise = new Promise((_, reject) => {");
            code.push(
                1,
                format!("setTimeout(() => reject(new Error(\"Request timed out\")), {timeout});"),
            );
            code.push(0, "});");
            code.blank();
            code.push(0, format!("Promise.race([fetch({url}, requestOptions), timeoutPromise])"));
        } else {
            code.push(0, format!("fetch({url}, requestOptions)"));
        }
        code.push(1, ".then((response) => response.text())");
        code.push(1, ".then((result) => console.log(result))");
        code.push(1, ".catch((error) => console.error(error));");
        code.render(&e.indent)
    }
}
