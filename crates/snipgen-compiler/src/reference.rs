//! Machine-generated option table.
//!
//! Lists every registered target with its label and option schema as JSON,
//! for host tools that render configuration UIs and for documentation. The
//! table is generated from [`TargetRegistry`], never written by hand.

use serde_json::{json, Value};

use crate::registry::TargetRegistry;

/// The option table as a JSON value.
pub fn options_table() -> Value {
    let registry = TargetRegistry::new();
    let targets: Vec<Value> = registry
        .iter()
        .map(|target| {
            json!({
                "id": target.id(),
                "label": target.label(),
                "options": target.options(),
            })
        })
        .collect();
    json!({
        "version": crate::SNIPGEN_VERSION,
        "total_targets": targets.len(),
        "targets": targets,
    })
}

/// The option table as pretty-printed JSON.
///
/// ```json
/// {
///   "version": "0.1.0",
///   "total_targets": 7,
///   "targets": [
///     {
///       "id": "go-native",
///       "label": "Go - Native",
///       "options": [{ "name": "Set indentation count", "id": "indentCount", ... }]
///     }
///   ]
/// }
/// ```
pub fn generate_options_table() -> String {
    format!("{:#}", options_table())
}
