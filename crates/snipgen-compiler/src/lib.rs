//! snipgen compiler: orchestrates request-to-snippet conversion.
//!
//! ```text
//! Request JSON → Request → Options → Body → Headers → Target assembly → snippet
//! ```
//!
//! The entry points look a target up in the [`TargetRegistry`] and run its
//! pipeline. Only caller-contract violations fail (an unknown target id, or
//! request text that is not JSON at all); malformed request data and option
//! values are normalized and still produce a snippet.

pub mod reference;
pub mod registry;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use snipgen_codegen::OptionDescriptor;
use snipgen_types::{ConvertError, ConvertResult, Request};
use tracing::{debug, instrument};

pub use registry::TargetRegistry;

/// Crate version, reported by hosts.
pub const SNIPGEN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert `request` into a snippet for `target_id`.
#[instrument(skip(request, options), fields(method = %request.method, mode = %request.body_mode()))]
pub fn convert(target_id: &str, request: &Request, options: &Map<String, Value>) -> ConvertResult<String> {
    let registry = TargetRegistry::new();
    let target = registry
        .get(target_id)
        .ok_or_else(|| ConvertError::UnknownTarget(target_id.to_string()))?;
    let snippet = target.convert(request, options);
    debug!(bytes = snippet.len(), "snippet emitted");
    Ok(snippet)
}

/// Like [`convert`], from JSON text. Option text that is not a JSON object
/// counts as no overrides.
pub fn convert_json(target_id: &str, request_json: &str, options_json: &str) -> ConvertResult<String> {
    let request = Request::from_json(request_json)?;
    convert(target_id, &request, &parse_options(options_json))
}

/// The option schema of `target_id`.
pub fn get_options(target_id: &str) -> ConvertResult<Vec<OptionDescriptor>> {
    TargetRegistry::new()
        .get(target_id)
        .map(|target| target.options())
        .ok_or_else(|| ConvertError::UnknownTarget(target_id.to_string()))
}

fn parse_options(json: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Hex SHA-256 of a snippet.
pub fn snippet_digest(snippet: &str) -> String {
    format!("{:x}", Sha256::digest(snippet.as_bytes()))
}

// ══════════════════════════════════════════════════════════════════════════════
// Structured result
// ══════════════════════════════════════════════════════════════════════════════

/// Serializable outcome of one conversion. Exactly one of `snippet` and
/// `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOutcome {
    pub success: bool,
    pub target: String,
    pub snippet: Option<String>,
    /// Hex SHA-256 of `snippet`.
    pub digest: Option<String>,
    pub error: Option<String>,
}

impl ConvertOutcome {
    pub fn from_result(target: &str, result: ConvertResult<String>) -> Self {
        match result {
            Ok(snippet) => Self {
                success: true,
                target: target.to_string(),
                digest: Some(snippet_digest(&snippet)),
                snippet: Some(snippet),
                error: None,
            },
            Err(err) => Self {
                success: false,
                target: target.to_string(),
                snippet: None,
                digest: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Convert from JSON text and report the outcome as data.
pub fn convert_to_result(target_id: &str, request_json: &str, options_json: &str) -> ConvertOutcome {
    ConvertOutcome::from_result(target_id, convert_json(target_id, request_json, options_json))
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════
