//! C using libcurl.

use snipgen_types::BodyMode;

use crate::fragment::CodeBlock;
use crate::grammar::{FileField, Grammar, Quote};
use crate::headers::header_block;
use crate::options::OptionDescriptor;
use crate::sanitize::{sanitize, JsonDialect};
use crate::target::{Emission, Target};

pub struct CLibcurl;

impl Grammar for CLibcurl {
    fn quote_style(&self) -> Quote {
        Quote::Double
    }

    fn json_dialect(&self) -> JsonDialect {
        JsonDialect::C
    }

    fn payload_symbol(&self, mode: BodyMode) -> &'static str {
        match mode {
            BodyMode::FormData => "mime",
            _ => "data",
        }
    }

    fn payload_statement(&self, _mode: BodyMode, literal: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("const char *data = {literal};"))
    }

    fn form_open(&self) -> CodeBlock {
        CodeBlock::new()
            .line(0, "curl_mime *mime;")
            .line(0, "curl_mimepart *part;")
            .line(0, "mime = curl_mime_init(curl);")
    }

    fn form_text_field(&self, key: &str, value: &str) -> CodeBlock {
        CodeBlock::new()
            .line(0, "part = curl_mime_addpart(mime);")
            .line(0, format!("curl_mime_name(part, \"{key}\");"))
            .line(0, format!("curl_mime_data(part, \"{value}\", CURL_ZERO_TERMINATED);"))
    }

    fn form_file_field(&self, field: FileField<'_>) -> CodeBlock {
        let FileField { key, path, .. } = field;
        CodeBlock::new()
            .line(0, "part = curl_mime_addpart(mime);")
            .line(0, format!("curl_mime_name(part, \"{key}\");"))
            .line(0, format!("if (curl_mime_filedata(part, \"{path}\") != CURLE_OK) {{"))
            .line(1, format!("fprintf(stderr, \"Cannot open file {path}\\n\");"))
            .line(1, "return 1;")
            .line(0, "}")
    }

    fn form_close(&self) -> CodeBlock {
        CodeBlock::new().line(0, "curl_easy_setopt(curl, CURLOPT_MIMEPOST, mime);")
    }

    fn header_entry(&self, key: &str, value: &str) -> String {
        format!("headers = curl_slist_append(headers, \"{key}: {value}\");")
    }

    fn header_open(&self) -> CodeBlock {
        CodeBlock::new().line(0, "struct curl_slist *headers = NULL;")
    }

    fn header_close(&self) -> CodeBlock {
        CodeBlock::new().line(0, "curl_easy_setopt(curl, CURLOPT_HTTPHEADER, headers);")
    }
}

impl Target for CLibcurl {
    fn id(&self) -> &'static str {
        "c-libcurl"
    }

    fn label(&self) -> &'static str {
        "C - libcurl"
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        let mut options = vec![OptionDescriptor::include_boilerplate()];
        options.extend(OptionDescriptor::standard());
        options
    }

    fn assemble(&self, e: &Emission<'_>) -> String {
        let timeout = e.options.request_timeout();
        let url = self.quote(&sanitize(e.request.url.to_string().as_str(), self.url_escape(), false));

        let mut easy = CodeBlock::new();
        easy.push(
            0,
            format!(
                "curl_easy_setopt(curl, CURLOPT_CUSTOMREQUEST, {});",
                self.string_literal(&e.request.method)
            ),
        );
        easy.push(0, format!("curl_easy_setopt(curl, CURLOPT_URL, {url});"));
        let follow = if e.options.follow_redirect() { "1L" } else { "0L" };
        easy.push(0, format!("curl_easy_setopt(curl, CURLOPT_FOLLOWLOCATION, {follow});"));
        easy.push(
            0,
            format!(
                "curl_easy_setopt(curl, CURLOPT_DEFAULT_PROTOCOL, {});",
                self.string_literal(e.request.url.protocol_or_default())
            ),
        );
        if timeout > 0 {
            easy.push(0, format!("curl_easy_setopt(curl, CURLOPT_TIMEOUT_MS, {timeout}L);"));
        }
        easy.append(&header_block(self, &e.headers), 0);
        easy.append(&e.body.code, 0);
        if let Some(payload) = e.body.payload {
            if !e.body.needs_multipart {
                easy.push(0, format!("curl_easy_setopt(curl, CURLOPT_POSTFIELDS, {payload});"));
            }
        }
        easy.push(0, "res = curl_easy_perform(curl);");
        if !e.headers.is_empty() {
            easy.push(0, "curl_slist_free_all(headers);");
        }
        if e.body.needs_multipart {
            easy.push(0, "curl_mime_free(mime);");
        }
        easy.push(0, "curl_easy_cleanup(curl);");

        let mut program = CodeBlock::new()
            .line(0, "CURL *curl;")
            .line(0, "CURLcode res = CURLE_FAILED_INIT;")
            .line(0, "curl = curl_easy_init();")
            .line(0, "if(curl) {");
        program.append(&easy, 1);
        program.push(0, "}");

        if !e.options.include_boilerplate() {
            return program.render(&e.indent);
        }
        let mut code = CodeBlock::new()
            .line(0, "#include <stdio.h>")
            .line(0, "#include <string.h>")
            .line(0, "#include <curl/curl.h>");
        code.blank();
        code.push(0, "int main(int argc, char *argv[]){");
        code.append(&program, 1);
        code.push(1, "return (int)res;");
        code.push(0, "}");
        code.render(&e.indent)
    }
}
