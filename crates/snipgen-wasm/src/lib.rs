//! snipgen as a WASM module for browser environments.
//!
//! This crate exposes the conversion pipeline via `wasm-bindgen`, suitable
//! for a browser tab or Web Worker.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { convert, get_options } from 'snipgen-wasm';
//!
//! await init();
//!
//! const request = { method: "GET", url: "https://postman-echo.com/get" };
//! const result = JSON.parse(convert("go-native", JSON.stringify(request), "{}"));
//! // { success: true, target: "go-native", snippet: "package main\n...", digest: "9f2c...", error: null }
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use snipgen_compiler::reference;
use snipgen_compiler::{ConvertOutcome, TargetRegistry};
use snipgen_types::{ConvertError, Request};
use wasm_bindgen::prelude::*;

/// Serialize for the JS side, reporting a failure as a JSON error object.
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        serde_json::json!({ "success": false, "error": format!("serialization error: {e}") }).to_string()
    })
}

/// Convert a request to a snippet.
///
/// `request_json` is the request object as JSON text, `options_json` the
/// option overrides (anything but a JSON object means "no overrides").
/// Returns a `ConvertOutcome` as JSON:
/// ```json
/// { "success": true, "target": "go-native", "snippet": "...", "digest": "...", "error": null }
/// ```
#[wasm_bindgen]
pub fn convert(target: &str, request_json: &str, options_json: &str) -> String {
    to_json(&snipgen_compiler::convert_to_result(target, request_json, options_json))
}

/// Convert plain JS objects without a JSON round trip on the caller side.
///
/// Resolves to the same `ConvertOutcome` shape as [`convert`], as a JS
/// object. A `request` that cannot be read as a request is reported in the
/// outcome's `error`.
#[wasm_bindgen(js_name = convertObject)]
pub fn convert_object(target: &str, request: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let request: Value = serde_wasm_bindgen::from_value(request)?;
    let options = match serde_wasm_bindgen::from_value::<Value>(options) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let result = serde_json::from_value::<Request>(request)
        .map_err(ConvertError::from)
        .and_then(|request| snipgen_compiler::convert(target, &request, &options));
    let outcome = ConvertOutcome::from_result(target, result);
    serde_wasm_bindgen::to_value(&outcome).map_err(JsValue::from)
}

/// The option schema of a target as a JSON array, or a JSON error object for
/// an unknown target.
#[wasm_bindgen]
pub fn get_options(target: &str) -> String {
    match snipgen_compiler::get_options(target) {
        Ok(options) => to_json(&options),
        Err(e) => to_json(&serde_json::json!({ "success": false, "error": e.to_string() })),
    }
}

/// All target ids with their labels, as a JSON array.
#[wasm_bindgen]
pub fn list_targets() -> String {
    let targets: Vec<Value> = TargetRegistry::new()
        .iter()
        .map(|t| serde_json::json!({ "id": t.id(), "label": t.label() }))
        .collect();
    to_json(&targets)
}

/// Every target with its option schema, as pretty JSON.
#[wasm_bindgen]
pub fn options_table() -> String {
    reference::generate_options_table()
}

/// Return the crate version string.
#[wasm_bindgen]
pub fn version() -> String {
    snipgen_compiler::SNIPGEN_VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_returns_outcome_json() {
        let out = convert("javascript-fetch", r#"{"url": "https://example.com"}"#, "{}");
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["target"], "javascript-fetch");
        assert!(parsed["snippet"].as_str().unwrap().contains("fetch(\"https://example.com\""));
    }

    #[test]
    fn convert_reports_unknown_target() {
        let parsed: Value = serde_json::from_str(&convert("nope", "{}", "{}")).unwrap();
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"], "unknown target: nope");
    }

    #[test]
    fn get_options_lists_schema() {
        let parsed: Value = serde_json::from_str(&get_options("c-libcurl")).unwrap();
        assert_eq!(parsed[0]["id"], "includeBoilerplate");
        let err: Value = serde_json::from_str(&get_options("nope")).unwrap();
        assert_eq!(err["success"], false);
    }

    #[test]
    fn list_targets_has_labels() {
        let parsed: Value = serde_json::from_str(&list_targets()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 7);
        assert_eq!(parsed[0]["label"], "Go - Native");
    }

    #[test]
    fn version_matches_crate() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
