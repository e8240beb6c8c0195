//! Go using `net/http`.

use snipgen_types::BodyMode;

use super::section;
use crate::fragment::CodeBlock;
use crate::grammar::{FileField, Grammar, Quote};
use crate::headers::header_block;
use crate::options::OptionDescriptor;
use crate::sanitize::sanitize;
use crate::target::{Emission, Target};

pub struct GoNative;

/// Largest millisecond count whose `time.Duration` fits Go's int64.
const MAX_TIMEOUT_MS: u64 = i64::MAX as u64 / 1_000_000;

/// `if <err> != nil { print; return }`
fn error_check(var: &str) -> CodeBlock {
    CodeBlock::new()
        .line(0, format!("if {var} != nil {{"))
        .line(1, format!("fmt.Println({var})"))
        .line(1, "return")
        .line(0, "}")
}

impl Grammar for GoNative {
    fn quote_style(&self) -> Quote {
        Quote::Double
    }

    fn payload_symbol(&self, _mode: BodyMode) -> &'static str {
        "payload"
    }

    fn payload_statement(&self, _mode: BodyMode, literal: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("payload := strings.NewReader({literal})"))
    }

    fn form_open(&self) -> CodeBlock {
        CodeBlock::new()
            .line(0, "payload := &bytes.Buffer{}")
            .line(0, "writer := multipart.NewWriter(payload)")
    }

    fn form_text_field(&self, key: &str, value: &str) -> CodeBlock {
        CodeBlock::new().line(0, format!("_ = writer.WriteField(\"{key}\", \"{value}\")"))
    }

    fn form_file_field(&self, field: FileField<'_>) -> CodeBlock {
        let FileField { index, key, path, .. } = field;
        let err = format!("errFile{index}");
        let mut code = CodeBlock::new().line(0, format!("file{index}, {err} := os.Open(\"{path}\")"));
        code.append(&error_check(&err), 0);
        code.push(0, format!("defer file{index}.Close()"));
        code.push(
            0,
            format!("part{index}, {err} := writer.CreateFormFile(\"{key}\", filepath.Base(\"{path}\"))"),
        );
        code.append(&error_check(&err), 0);
        code.push(0, format!("_, {err} = io.Copy(part{index}, file{index})"));
        code.append(&error_check(&err), 0);
        code
    }

    fn form_close(&self) -> CodeBlock {
        let mut code = CodeBlock::new().line(0, "err := writer.Close()");
        code.append(&error_check("err"), 0);
        code
    }

    fn header_entry(&self, key: &str, value: &str) -> String {
        format!("req.Header.Add(\"{key}\", \"{value}\")")
    }
}

impl Target for GoNative {
    fn id(&self) -> &'static str {
        "go-native"
    }

    fn label(&self) -> &'static str {
        "Go - Native"
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        OptionDescriptor::standard()
    }

    fn assemble(&self, e: &Emission<'_>) -> String {
        let timeout = e.options.request_timeout();
        let body = &e.body;

        let mut imports = vec!["fmt", "io", "net/http"];
        if body.payload.is_some() && !body.needs_multipart {
            imports.push("strings");
        }
        if body.needs_multipart {
            imports.extend(["bytes", "mime/multipart"]);
        }
        if body.needs_file_io {
            imports.extend(["os", "path/filepath"]);
        }
        if timeout > 0 {
            imports.push("time");
        }
        imports.sort_unstable();

        let mut code = CodeBlock::new().line(0, "package main");
        code.blank();
        code.push(0, "import (");
        for import in imports {
            code.push(1, format!("\"{import}\""));
        }
        code.push(0, ")");
        code.blank();
        code.push(0, "func main() {");
        code.blank();
        let url = sanitize(e.request.url.to_string().as_str(), self.url_escape(), false);
        code.push(1, format!("url := {}", self.quote(&url)));
        code.push(1, format!("method := {}", self.string_literal(&e.request.method)));
        code.blank();
        section(&mut code, &body.code, 1);

        code.push(1, "client := &http.Client{");
        if timeout > 0 {
            code.push(
                2,
                format!("Timeout: time.Duration({}) * time.Millisecond,", timeout.min(MAX_TIMEOUT_MS)),
            );
        }
        if !e.options.follow_redirect() {
            code.push(2, "CheckRedirect: func(req *http.Request, via []*http.Request) error {");
            code.push(3, "return http.ErrUseLastResponse");
            code.push(2, "},");
        }
        code.push(1, "}");
        code.push(
            1,
            format!("req, err := http.NewRequest(method, url, {})", body.payload.unwrap_or("nil")),
        );
        code.blank();
        code.append(&error_check("err"), 1);
        code.append(&header_block(self, &e.headers), 1);
        if body.needs_multipart {
            code.push(1, "req.Header.Set(\"Content-Type\", writer.FormDataContentType())");
        }
        code.blank();

        code.push(1, "res, err := client.Do(req)");
        code.append(&error_check("err"), 1);
        code.push(1, "defer res.Body.Close()");
        code.blank();
        code.push(1, "body, err := io.ReadAll(res.Body)");
        code.append(&error_check("err"), 1);
        code.push(1, "fmt.Println(string(body))");
        code.push(0, "}");
        code.render(&e.indent)
    }
}
