//! Permissive field decoders.
//!
//! Request descriptions come from arbitrary hosts. A field that should hold
//! text but holds a number, object or null decodes to `None` instead of
//! failing the whole request.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a textual field, mapping every non-string JSON value to `None`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Decode a flag, treating anything but `true` as `false`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Decode a list, mapping a non-array value to an empty list and dropping
/// elements that do not decode.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
