//! Integration tests for the target emitters.
//!
//! Tests validate, for every target:
//! - Bodiless, headerless requests emit no payload or header code
//! - Header keys are trimmed and values kept verbatim
//! - URL-encoded bodies keep order and drop disabled pairs
//! - Multipart file fields open the file and carry an error branch
//! - Timeouts appear only when requested
//! - Byte-identical output across repeated conversions

use serde_json::{json, Map, Value};
use snipgen_codegen::targets::{
    self, CLibcurl, GoNative, JsFetch, JsJquery, NodejsNative, PhpCurl, SwiftUrlSession,
};
use snipgen_codegen::Target;
use snipgen_types::Request;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn request(value: Value) -> Request {
    Request::from_json(&value.to_string()).expect("request JSON")
}

fn options(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn convert(target: &dyn Target, req: &Request, opts: Value) -> String {
    target.convert(req, &options(opts))
}

/// Per-target markers the scenarios look for.
struct Markers {
    id: &'static str,
    payload: &'static str,
    header_block: &'static str,
    header_entry: &'static str,
    file_open: &'static str,
    file_attach: &'static str,
    file_error: &'static str,
    timeout_any: &'static str,
    timeout_3000: &'static str,
}

const MARKERS: &[Markers] = &[
    Markers {
        id: "go-native",
        payload: "payload",
        header_block: "req.Header",
        header_entry: r#"req.Header.Add("a", "  b  ")"#,
        file_open: r#"os.Open("/tmp/a.txt")"#,
        file_attach: r#"writer.CreateFormFile("f", filepath.Base("/tmp/a.txt"))"#,
        file_error: "if errFile1 != nil {",
        timeout_any: "Timeout",
        timeout_3000: "Timeout: time.Duration(3000) * time.Millisecond,",
    },
    Markers {
        id: "javascript-fetch",
        payload: "body:",
        header_block: "myHeaders",
        header_entry: r#"myHeaders.append("a", "  b  ");"#,
        file_open: "fileInput.files[0]",
        file_attach: r#"formdata.append("f", fileInput.files[0], "a.txt");"#,
        file_error: r#"throw new Error("Cannot read file /tmp/a.txt");"#,
        timeout_any: "setTimeout",
        timeout_3000: "reject(new Error(\"Request timed out\")), 3000);",
    },
    Markers {
        id: "javascript-jquery",
        payload: "\"data\"",
        header_block: "\"headers\"",
        header_entry: r#""a": "  b  ""#,
        file_open: "fileInput.files[0]",
        file_attach: r#"form.append("f", fileInput.files[0], "a.txt");"#,
        file_error: r#"throw new Error("Cannot read file /tmp/a.txt");"#,
        timeout_any: "timeout",
        timeout_3000: "\"timeout\": 3000",
    },
    Markers {
        id: "nodejs-native",
        payload: "postData",
        header_block: "'headers'",
        header_entry: "'a': '  b  '",
        file_open: "fs.readFileSync('/tmp/a.txt')",
        file_attach: r#"name="f"; filename="a.txt""#,
        file_error: "} catch (err) {",
        timeout_any: "setTimeout",
        timeout_3000: "req.setTimeout(3000, () => {",
    },
    Markers {
        id: "php-curl",
        payload: "$payload",
        header_block: "CURLOPT_HTTPHEADER",
        header_entry: "'a:   b  '",
        file_open: "fopen('/tmp/a.txt', 'r')",
        file_attach: "$payload['f'] = new CURLFile('/tmp/a.txt');",
        file_error: "die('Cannot open file /tmp/a.txt');",
        timeout_any: "TIMEOUT",
        timeout_3000: "CURLOPT_TIMEOUT_MS => 3000,",
    },
    Markers {
        id: "c-libcurl",
        payload: "CURLOPT_POSTFIELDS",
        header_block: "curl_slist",
        header_entry: r#"headers = curl_slist_append(headers, "a:   b  ");"#,
        file_open: r#"curl_mime_filedata(part, "/tmp/a.txt")"#,
        file_attach: r#"curl_mime_name(part, "f");"#,
        file_error: "!= CURLE_OK) {",
        timeout_any: "TIMEOUT",
        timeout_3000: "curl_easy_setopt(curl, CURLOPT_TIMEOUT_MS, 3000L);",
    },
    Markers {
        id: "swift-urlsession",
        payload: "postData",
        header_block: "forHTTPHeaderField",
        header_entry: r#"request.addValue("  b  ", forHTTPHeaderField: "a")"#,
        file_open: r#"URL(fileURLWithPath: "/tmp/a.txt")"#,
        file_attach: r#"name=\"f\"; filename=\"a.txt\""#,
        file_error: "} catch {",
        timeout_any: "timeoutInterval",
        timeout_3000: "timeoutInterval: 3)",
    },
];

fn each_target(mut check: impl FnMut(&dyn Target, &Markers)) {
    let all = targets::all();
    assert_eq!(all.len(), MARKERS.len());
    for markers in MARKERS {
        let target = all
            .iter()
            .find(|t| t.id() == markers.id)
            .unwrap_or_else(|| panic!("missing target {}", markers.id));
        check(target.as_ref(), markers);
    }
}

fn post(body: Value) -> Request {
    request(json!({
        "method": "POST",
        "url": "https://postman-echo.com/post",
        "body": body
    }))
}

// ══════════════════════════════════════════════════════════════════════════════
// Scenarios
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn bodiless_headerless_request_has_no_payload_or_headers() {
    let req = request(json!({ "method": "GET", "url": "https://example.com/get" }));
    each_target(|target, m| {
        let snippet = convert(target, &req, json!({}));
        assert!(!snippet.contains(m.payload), "{}: payload in\n{snippet}", m.id);
        assert!(!snippet.contains(m.header_block), "{}: headers in\n{snippet}", m.id);
        assert!(snippet.contains("example.com"), "{}: url missing\n{snippet}", m.id);
    });
}

#[test]
fn header_keys_trimmed_values_kept() {
    let req = request(json!({
        "method": "GET",
        "url": "https://example.com",
        "header": [{ "key": "  a  ", "value": "  b  " }]
    }));
    each_target(|target, m| {
        for trim in [false, true] {
            let snippet = convert(target, &req, json!({ "trimRequestBody": trim }));
            assert!(snippet.contains(m.header_entry), "{}: expected {:?} in\n{snippet}", m.id, m.header_entry);
        }
    });
}

#[test]
fn disabled_headers_are_omitted() {
    let req = request(json!({
        "method": "GET",
        "url": "https://example.com",
        "header": [
            { "key": "X-Secret", "value": "hidden", "disabled": true },
            { "key": "X-Shown", "value": "visible" }
        ]
    }));
    each_target(|target, m| {
        let snippet = convert(target, &req, json!({}));
        assert!(!snippet.contains("X-Secret"), "{}", m.id);
        assert!(!snippet.contains("hidden"), "{}", m.id);
        assert!(snippet.contains("X-Shown"), "{}", m.id);
    });
}

#[test]
fn urlencoded_keeps_order_and_drops_disabled() {
    let req = post(json!({
        "mode": "urlencoded",
        "urlencoded": [
            { "key": "x", "value": "1" },
            { "key": "y", "value": "2", "disabled": true },
            { "key": "z", "value": "3" }
        ]
    }));
    each_target(|target, m| {
        let snippet = convert(target, &req, json!({}));
        assert!(snippet.contains("x=1&z=3"), "{}:\n{snippet}", m.id);
        assert!(!snippet.contains("y=2"), "{}", m.id);
        assert!(snippet.contains(m.payload), "{}", m.id);
    });
}

#[test]
fn formdata_file_field_opens_attaches_and_checks() {
    let req = post(json!({
        "mode": "formdata",
        "formdata": [{ "key": "f", "type": "file", "src": "/tmp/a.txt" }]
    }));
    each_target(|target, m| {
        let snippet = convert(target, &req, json!({}));
        assert!(snippet.contains(m.file_open), "{}: open missing\n{snippet}", m.id);
        assert!(snippet.contains(m.file_attach), "{}: attach missing\n{snippet}", m.id);
        assert!(snippet.contains(m.file_error), "{}: error branch missing\n{snippet}", m.id);
    });
}

#[test]
fn timeout_only_when_requested() {
    let req = request(json!({ "method": "GET", "url": "https://example.com" }));
    each_target(|target, m| {
        let none = convert(target, &req, json!({ "requestTimeout": 0 }));
        assert!(!none.contains(m.timeout_any), "{}: timeout code in\n{none}", m.id);
        let some = convert(target, &req, json!({ "requestTimeout": 3000 }));
        assert!(some.contains(m.timeout_3000), "{}: expected {:?} in\n{some}", m.id, m.timeout_3000);
    });
}

#[test]
fn conversion_is_byte_identical() {
    let req = post(json!({
        "mode": "formdata",
        "formdata": [
            { "key": "name", "value": "snip", "type": "text" },
            { "key": "f", "type": "file", "src": "/tmp/a.txt" }
        ]
    }));
    each_target(|target, m| {
        let first = convert(target, &req, json!({ "indentType": "Tab", "indentCount": 1 }));
        for _ in 0..20 {
            assert_eq!(convert(target, &req, json!({ "indentType": "Tab", "indentCount": 1 })), first, "{}", m.id);
        }
    });
}

#[test]
fn file_body_injects_text_plain_and_uses_placeholder() {
    let req = post(json!({ "mode": "file", "file": { "src": "/secret/data.bin" } }));
    each_target(|target, m| {
        let snippet = convert(target, &req, json!({}));
        assert!(snippet.contains("<file contents here>"), "{}", m.id);
        assert!(snippet.contains("text/plain"), "{}:\n{snippet}", m.id);
        assert!(!snippet.contains("/secret/data.bin"), "{}", m.id);
    });
}

#[test]
fn invalid_options_fall_back_to_defaults() {
    let req = post(json!({ "mode": "raw", "raw": "{\"a\":1}" }));
    each_target(|target, m| {
        let defaults = convert(target, &req, json!({}));
        let garbage = convert(
            target,
            &req,
            json!({ "indentCount": "four", "indentType": "Emoji", "requestTimeout": -5, "unknown": true }),
        );
        assert_eq!(defaults, garbage, "{}", m.id);
    });
}

// ══════════════════════════════════════════════════════════════════════════════
// Target specifics
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn go_raw_post_snippet() {
    let req = request(json!({
        "method": "POST",
        "url": "https://postman-echo.com/post",
        "header": [{ "key": "Content-Type", "value": "application/json" }],
        "body": { "mode": "raw", "raw": "{\"a\":1}" }
    }));
    let expected = r#"package main

import (
  "fmt"
  "io"
  "net/http"
  "strings"
)

func main() {

  url := "https://postman-echo.com/post"
  method := "POST"

  payload := strings.NewReader("{\"a\":1}")

  client := &http.Client{
  }
  req, err := http.NewRequest(method, url, payload)

  if err != nil {
    fmt.Println(err)
    return
  }
  req.Header.Add("Content-Type", "application/json")

  res, err := client.Do(req)
  if err != nil {
    fmt.Println(err)
    return
  }
  defer res.Body.Close()

  body, err := io.ReadAll(res.Body)
  if err != nil {
    fmt.Println(err)
    return
  }
  fmt.Println(string(body))
}"#;
    assert_eq!(convert(&GoNative, &req, json!({})), expected);
}

#[test]
fn go_imports_follow_body_needs() {
    let req = post(json!({
        "mode": "formdata",
        "formdata": [{ "key": "f", "type": "file", "src": "/tmp/a.txt" }]
    }));
    let snippet = convert(&GoNative, &req, json!({ "followRedirect": false }));
    for import in ["\"bytes\"", "\"mime/multipart\"", "\"os\"", "\"path/filepath\""] {
        assert!(snippet.contains(import), "missing {import}");
    }
    assert!(!snippet.contains("\"strings\""));
    assert!(snippet.contains("return http.ErrUseLastResponse"));
    assert!(snippet.contains("req.Header.Set(\"Content-Type\", writer.FormDataContentType())"));
}

#[test]
fn libcurl_raw_post_snippet() {
    let req = request(json!({
        "method": "POST",
        "url": "https://postman-echo.com/post",
        "header": [{ "key": "Content-Type", "value": "application/json" }],
        "body": { "mode": "raw", "raw": "{\"a\":1}" }
    }));
    let expected = r#"CURL *curl;
CURLcode res = CURLE_FAILED_INIT;
curl = curl_easy_init();
if(curl) {
  curl_easy_setopt(curl, CURLOPT_CUSTOMREQUEST, "POST");
  curl_easy_setopt(curl, CURLOPT_URL, "https://postman-echo.com/post");
  curl_easy_setopt(curl, CURLOPT_FOLLOWLOCATION, 1L);
  curl_easy_setopt(curl, CURLOPT_DEFAULT_PROTOCOL, "https");
  struct curl_slist *headers = NULL;
  headers = curl_slist_append(headers, "Content-Type: application/json");
  curl_easy_setopt(curl, CURLOPT_HTTPHEADER, headers);
  const char *data = "{\"a\":1}";
  curl_easy_setopt(curl, CURLOPT_POSTFIELDS, data);
  res = curl_easy_perform(curl);
  curl_slist_free_all(headers);
  curl_easy_cleanup(curl);
}"#;
    assert_eq!(convert(&CLibcurl, &req, json!({})), expected);
}

#[test]
fn libcurl_boilerplate_wraps_main() {
    let req = request(json!({ "method": "GET", "url": "https://example.com" }));
    let bare = convert(&CLibcurl, &req, json!({}));
    assert!(!bare.contains("#include"));
    let full = convert(&CLibcurl, &req, json!({ "includeBoilerplate": true }));
    assert!(full.starts_with("#include <stdio.h>\n#include <string.h>\n#include <curl/curl.h>\n\nint main("));
    assert!(full.ends_with("  return (int)res;\n}"));
}

#[test]
fn libcurl_raw_control_characters_use_octal() {
    let req = post(json!({ "mode": "raw", "raw": "a\u{1}b" }));
    let snippet = convert(&CLibcurl, &req, json!({}));
    assert!(snippet.contains(r#"const char *data = "a\001b";"#), "{snippet}");
}

#[test]
fn php_raw_body_escapes_interpolation() {
    let req = post(json!({ "mode": "raw", "raw": "{\"price\": \"$5\"}" }));
    let snippet = convert(&PhpCurl, &req, json!({}));
    assert!(snippet.contains(r#"$payload = "{\"price\": \"\$5\"}";"#), "{snippet}");
    assert!(snippet.contains("CURLOPT_POSTFIELDS => $payload,"));
    assert!(snippet.starts_with("<?php"));
}

#[test]
fn swift_raw_body_uses_braced_unicode() {
    let req = post(json!({ "mode": "raw", "raw": "tab\u{8}" }));
    let snippet = convert(&SwiftUrlSession, &req, json!({}));
    assert!(snippet.contains(r#"let parameters = "tab\u{8}""#), "{snippet}");
    assert!(snippet.contains("request.httpBody = postData"));
}

#[test]
fn node_follow_redirects_and_delete_length() {
    let req = request(json!({
        "method": "DELETE",
        "url": "http://localhost:8080/items?id=1",
        "body": { "mode": "raw", "raw": "gone" }
    }));
    let snippet = convert(&NodejsNative, &req, json!({}));
    assert!(snippet.starts_with("const http = require('follow-redirects').http;"));
    assert!(snippet.contains("'hostname': 'localhost'"));
    assert!(snippet.contains("'port': '8080'"));
    assert!(snippet.contains("'path': '/items?id=1'"));
    assert!(snippet.contains("'maxRedirects': 20"));
    assert!(snippet.contains("req.setHeader('Content-Length', Buffer.byteLength(postData));"));

    let manual = convert(&NodejsNative, &req, json!({ "followRedirect": false }));
    assert!(manual.starts_with("const http = require('http');"));
    assert!(!manual.contains("maxRedirects"));
}

#[test]
fn node_multipart_sets_boundary_header() {
    let req = post(json!({
        "mode": "formdata",
        "formdata": [{ "key": "k", "value": "v" }]
    }));
    let snippet = convert(&NodejsNative, &req, json!({}));
    assert!(snippet.contains(
        "'Content-Type': 'multipart/form-data; boundary=----WebKitFormBoundary7MA4YWxkTrZu0gW'"
    ));
    assert!(!snippet.contains("require('fs')"));
}

#[test]
fn fetch_redirect_policy() {
    let req = request(json!({ "method": "GET", "url": "https://example.com" }));
    assert!(convert(&JsFetch, &req, json!({})).contains("redirect: \"follow\""));
    assert!(convert(&JsFetch, &req, json!({ "followRedirect": false })).contains("redirect: \"manual\""));
}

#[test]
fn tab_indentation_is_applied() {
    let req = request(json!({ "method": "GET", "url": "https://example.com" }));
    let snippet = convert(&GoNative, &req, json!({ "indentType": "Tab", "indentCount": 1 }));
    assert!(snippet.contains("\n\turl := \"https://example.com\""));
}

#[test]
fn browser_targets_name_uploads_by_file_name() {
    let req = post(json!({
        "mode": "formdata",
        "formdata": [{ "key": "f", "type": "file", "src": "/tmp/dir/a.txt" }]
    }));
    let fetch = convert(&JsFetch, &req, json!({}));
    assert!(fetch.contains(r#"formdata.append("f", fileInput.files[0], "a.txt");"#), "{fetch}");
    let jquery = convert(&JsJquery, &req, json!({}));
    assert!(jquery.contains(r#"form.append("f", fileInput.files[0], "a.txt");"#), "{jquery}");
    assert!(!jquery.contains("\"/tmp/dir/a.txt\")"));
}

#[test]
fn go_timeout_stays_within_duration_range() {
    let req = request(json!({ "method": "GET", "url": "https://example.com" }));
    let snippet = convert(&GoNative, &req, json!({ "requestTimeout": 1500 }));
    assert!(snippet.contains("Timeout: time.Duration(1500) * time.Millisecond,"));
    let huge = convert(&GoNative, &req, json!({ "requestTimeout": u64::MAX }));
    assert!(huge.contains("Timeout: time.Duration(9223372036854) * time.Millisecond,"), "{huge}");
}

#[test]
fn huge_indent_count_still_converts() {
    let req = post(json!({ "mode": "raw", "raw": "x" }));
    each_target(|target, m| {
        let snippet = convert(target, &req, json!({ "indentCount": 1u64 << 40 }));
        assert!(!snippet.is_empty(), "{}", m.id);
        let widest = snippet.lines().map(|l| l.len() - l.trim_start().len()).max().unwrap_or(0);
        assert!(widest <= 32 * 4, "{}: indent of {widest}", m.id);
    });
}
