//! Swift using `URLSession`.

use snipgen_types::BodyMode;

use super::{seconds, section};
use crate::fragment::CodeBlock;
use crate::grammar::{FileField, Grammar, Quote};
use crate::headers::header_block;
use crate::options::OptionDescriptor;
use crate::sanitize::{sanitize, JsonDialect};
use crate::target::{Emission, Target};

pub struct SwiftUrlSession;

/// `body.append("<text>".data(using: .utf8)!)`
fn append_text(text: &str) -> String {
    format!("body.append(\"{text}\".data(using: .utf8)!)")
}

impl Grammar for SwiftUrlSession {
    fn quote_style(&self) -> Quote {
        Quote::Double
    }

    fn json_dialect(&self) -> JsonDialect {
        JsonDialect::Swift
    }

    fn payload_symbol(&self, _mode: BodyMode) -> &'static str {
        "postData"
    }

    fn payload_statement(&self, _mode: BodyMode, literal: &str) -> CodeBlock {
        CodeBlock::new()
            .line(0, format!("let parameters = {literal}"))
            .line(0, "let postData = parameters.data(using: .utf8)")
    }

    fn form_open(&self) -> CodeBlock {
        CodeBlock::new()
            .line(0, "let boundary = \"Boundary-\\(UUID().uuidString)\"")
            .line(0, "var body = Data()")
    }

    fn form_text_field(&self, key: &str, value: &str) -> CodeBlock {
        CodeBlock::new().line(
            0,
            append_text(&format!(
                "--\\(boundary)\\r\\nContent-Disposition: form-data; name=\\\"{key}\\\"\\r\\n\\r\\n{value}\\r\\n"
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
            .line(0, "do {")
            .line(
                1,
                format!("let fileData{index} = try Data(contentsOf: URL(fileURLWithPath: \"{path}\"))"),
            )
            .line(
                1,
                append_text(&format!(
                    "--\\(boundary)\\r\\nContent-Disposition: form-data; name=\\\"{key}\\\"; filename=\\\"{name}\\\"\\r\\nContent-Type: application/octet-stream\\r\\n\\r\\n"
                )),
            )
            .line(1, format!("body.append(fileData{index})"))
            .line(1, append_text("\\r\\n"))
            .line(0, "} catch {")
            .line(1, format!("print(\"Cannot read file {path}: \\(error)\")"))
            .line(1, "exit(1)")
            .line(0, "}")
    }

    fn form_close(&self) -> CodeBlock {
        CodeBlock::new()
            .line(0, append_text("--\\(boundary)--\\r\\n"))
            .line(0, "let postData = body")
    }

    fn header_entry(&self, key: &str, value: &str) -> String {
        format!("request.addValue(\"{value}\", forHTTPHeaderField: \"{key}\")")
    }
}

impl Target for SwiftUrlSession {
    fn id(&self) -> &'static str {
        "swift-urlsession"
    }

    fn label(&self) -> &'static str {
        "Swift - URLSession"
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

        let mut code = CodeBlock::new()
            .line(0, "import Foundation")
            .line(0, "#if canImport(FoundationNetworking)")
            .line(0, "import FoundationNetworking")
            .line(0, "#endif");
        code.blank();
        section(&mut code, &e.body.code, 0);

        if timeout > 0 {
            code.push(
                0,
                format!(
                    "var request = URLRequest(url: URL(string: {url})!, timeoutInterval: {})",
                    seconds(timeout)
                ),
            );
        } else {
            code.push(0, format!("var request = URLRequest(url: URL(string: {url})!)"));
        }
        code.append(&header_block(self, &e.headers), 0);
        if e.body.needs_multipart {
            code.push(
                0,
                "request.addValue(\"multipart/form-data; boundary=\\(boundary)\", forHTTPHeaderField: \"Content-Type\")",
            );
        }
        code.blank();
        code.push(
            0,
            format!("request.httpMethod = {}", self.string_literal(&e.request.method)),
        );
        if let Some(payload) = e.body.payload {
            code.push(0, format!("request.httpBody = {payload}"));
        }
        code.blank();
        code.push(0, "let semaphore = DispatchSemaphore(value: 0)");
        code.push(0, "let task = URLSession.shared.dataTask(with: request) { data, response, error in");
        code.push(1, "guard let data = data else {");
        code.push(2, "print(String(describing: error))");
        code.push(2, "semaphore.signal()");
        code.push(2, "return");
        code.push(1, "}");
        code.push(1, "print(String(data: data, encoding: .utf8)!)");
        code.push(1, "semaphore.signal()");
        code.push(0, "}");
        code.blank();
        code.push(0, "task.resume()");
        code.push(0, "semaphore.wait()");
        code.render(&e.indent)
    }
}
