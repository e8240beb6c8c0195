//! PHP using the cURL extension.

use snipgen_types::BodyMode;

use super::section;
use crate::fragment::CodeBlock;
use crate::grammar::{FileField, Grammar, Quote};
use crate::headers::header_block;
use crate::options::OptionDescriptor;
use crate::sanitize::{sanitize, JsonDialect};
use crate::target::{Emission, Target};

pub struct PhpCurl;

impl Grammar for PhpCurl {
    fn quote_style(&self) -> Quote {
        Quote::Single
    }

    fn json_dialect(&self) -> JsonDialect {
        JsonDialect::Php
    }

    fn payload_symbol(&self, _mode: BodyMode) -> &'static str {
        "$payload"
    }

    fn payload_statement(&self, _mode: BodyMode, literal: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("$payload = {literal};"))
    }

    fn form_open(&self) -> CodeBlock {
        CodeBlock::new().line(0, "$payload = array();")
    }

    fn form_text_field(&self, key: &str, value: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("$payload['{key}'] = '{value}';"))
    }

    fn form_file_field(&self, field: FileField<'_>) -> CodeBlock {
        let FileField { index, key, path, .. } = field;
        CodeBlock::new()
            .line(0, format!("$file{index} = fopen('{path}', 'r');"))
            .line(0, format!("if ($file{index} === false) {{"))
            .line(1, format!("die('Cannot open file {path}');"))
            .line(0, "}")
            .line(0, format!("fclose($file{index});"))
            .line(0, format!("$payload['{key}'] = new CURLFile('{path}');"))
    }

    fn form_close(&self) -> CodeBlock {
        CodeBlock::new()
    }

    fn header_entry(&self, key: &str, value: &str) -> String {
        format!("'{key}: {value}'")
    }

    fn header_separator(&self) -> &'static str {
        ","
    }

    fn header_depth(&self) -> usize {
        1
    }

    fn header_open(&self) -> CodeBlock {
        CodeBlock::new().line(0, "CURLOPT_HTTPHEADER => array(")
    }

    fn header_close(&self) -> CodeBlock {
        CodeBlock::new().line(0, "),")
    }
}

impl Target for PhpCurl {
    fn id(&self) -> &'static str {
        "php-curl"
    }

    fn label(&self) -> &'static str {
        "PHP - cURL"
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        OptionDescriptor::standard()
    }

    fn assemble(&self, e: &Emission<'_>) -> String {
        let timeout = e.options.request_timeout();
        let follow = if e.options.follow_redirect() {
            "true"
        } else {
            "false"
        };
        let url = self.quote(&sanitize(e.request.url.to_string().as_str(), self.url_escape(), false));

        let mut code = CodeBlock::new().line(0, "<?php");
        code.blank();
        code.push(0, "$curl = curl_init();");
        code.blank();
        section(&mut code, &e.body.code, 0);

        code.push(0, "curl_setopt_array($curl, array(");
        code.push(1, format!("CURLOPT_URL => {url},"));
        code.push(1, "CURLOPT_RETURNTRANSFER => true,");
        code.push(1, "CURLOPT_ENCODING => '',");
        code.push(1, "CURLOPT_MAXREDIRS => 10,");
        if timeout > 0 {
            code.push(1, format!("CURLOPT_TIMEOUT_MS => {timeout},"));
        }
        code.push(1, format!("CURLOPT_FOLLOWLOCATION => {follow},"));
        code.push(1, "CURLOPT_HTTP_VERSION => CURL_HTTP_VERSION_1_1,");
        code.push(
            1,
            format!("CURLOPT_CUSTOMREQUEST => {},", self.string_literal(&e.request.method)),
        );
        if let Some(payload) = e.body.payload {
            code.push(1, format!("CURLOPT_POSTFIELDS => {payload},"));
        }
        code.append(&header_block(self, &e.headers), 1);
        code.push(0, "));");
        code.blank();
        code.push(0, "$response = curl_exec($curl);");
        code.blank();
        code.push(0, "curl_close($curl);");
        code.push(0, "echo $response;");
        code.render(&e.indent)
    }
}
