//! Option schema and validator.
//!
//! Every target declares the knobs it understands as a list of
//! [`OptionDescriptor`]s. [`validate`] resolves user overrides against that
//! schema: unknown ids are discarded, wrong-typed values fall back to the
//! declared default, and missing ids are filled with defaults. The result
//! always carries exactly the schema's ids. Validation never fails.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

pub const INDENT_COUNT: &str = "indentCount";
pub const INDENT_TYPE: &str = "indentType";
pub const REQUEST_TIMEOUT: &str = "requestTimeout";
pub const FOLLOW_REDIRECT: &str = "followRedirect";
pub const TRIM_REQUEST_BODY: &str = "trimRequestBody";
pub const INCLUDE_BOILERPLATE: &str = "includeBoilerplate";

/// Widest indent unit [`ResolvedOptions::indent`] produces.
pub const MAX_INDENT_COUNT: u64 = 32;

// ══════════════════════════════════════════════════════════════════════════════
// Schema
// ══════════════════════════════════════════════════════════════════════════════

/// Declared type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionKind {
    Boolean,
    PositiveInteger,
    Enum,
}

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(u64),
    Text(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One configurable knob, in the shape host tools render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDescriptor {
    /// Human-readable label.
    pub name: &'static str,
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    /// Allowed values, enum options only.
    #[serde(rename = "availableOptions", skip_serializing_if = "no_values")]
    pub available: &'static [&'static str],
    pub default: OptionValue,
    pub description: &'static str,
}

fn no_values(values: &&'static [&'static str]) -> bool {
    values.is_empty()
}

impl OptionDescriptor {
    pub fn indent_count() -> Self {
        Self {
            name: "Set indentation count",
            id: INDENT_COUNT,
            kind: OptionKind::PositiveInteger,
            available: &[],
            default: OptionValue::Integer(2),
            description: "Set the number of indentation characters to add per code level",
        }
    }

    pub fn indent_type() -> Self {
        Self {
            name: "Set indentation type",
            id: INDENT_TYPE,
            kind: OptionKind::Enum,
            available: &["Tab", "Space"],
            default: OptionValue::Text("Space".to_string()),
            description: "Select the character used to indent lines of code",
        }
    }

    pub fn request_timeout() -> Self {
        Self {
            name: "Set request timeout",
            id: REQUEST_TIMEOUT,
            kind: OptionKind::PositiveInteger,
            available: &[],
            default: OptionValue::Integer(0),
            description: "Set number of milliseconds the request should wait for a response \
                          before timing out (use 0 for infinity)",
        }
    }

    pub fn follow_redirect() -> Self {
        Self {
            name: "Follow redirects",
            id: FOLLOW_REDIRECT,
            kind: OptionKind::Boolean,
            available: &[],
            default: OptionValue::Bool(true),
            description: "Automatically follow HTTP redirects",
        }
    }

    pub fn trim_request_body() -> Self {
        Self {
            name: "Trim request body fields",
            id: TRIM_REQUEST_BODY,
            kind: OptionKind::Boolean,
            available: &[],
            default: OptionValue::Bool(false),
            description: "Remove white space and additional lines that may affect the server's response",
        }
    }

    pub fn include_boilerplate() -> Self {
        Self {
            name: "Include boilerplate",
            id: INCLUDE_BOILERPLATE,
            kind: OptionKind::Boolean,
            available: &[],
            default: OptionValue::Bool(false),
            description: "Include class definition and import statements in snippet",
        }
    }

    /// The five options every target understands.
    pub fn standard() -> Vec<Self> {
        vec![
            Self::indent_count(),
            Self::indent_type(),
            Self::request_timeout(),
            Self::follow_redirect(),
            Self::trim_request_body(),
        ]
    }

    /// Coerce a user value to this option's type, or fall back to the default.
    fn coerce(&self, value: &Value) -> OptionValue {
        let accepted = match (self.kind, value) {
            (OptionKind::Boolean, Value::Bool(b)) => Some(OptionValue::Bool(*b)),
            (OptionKind::PositiveInteger, Value::Number(n)) => n
                .as_u64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                        .map(|f| f as u64)
                })
                .map(OptionValue::Integer),
            (OptionKind::Enum, Value::String(s)) if self.available.contains(&s.as_str()) => {
                Some(OptionValue::Text(s.clone()))
            }
            _ => None,
        };
        accepted.unwrap_or_else(|| self.default.clone())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Validation
// ══════════════════════════════════════════════════════════════════════════════

/// Options after validation: exactly one value per schema id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedOptions {
    values: BTreeMap<&'static str, OptionValue>,
}

/// Resolve user overrides against a schema.
pub fn validate(user: &Map<String, Value>, schema: &[OptionDescriptor]) -> ResolvedOptions {
    let values = schema
        .iter()
        .map(|desc| {
            let value = match user.get(desc.id) {
                Some(v) => desc.coerce(v),
                None => desc.default.clone(),
            };
            (desc.id, value)
        })
        .collect();
    ResolvedOptions { values }
}

/// Like [`validate`], for an arbitrary JSON value. Anything but an object
/// counts as "no overrides".
pub fn validate_value(user: &Value, schema: &[OptionDescriptor]) -> ResolvedOptions {
    match user {
        Value::Object(map) => validate(map, schema),
        _ => validate(&Map::new(), schema),
    }
}

impl ResolvedOptions {
    pub fn get(&self, id: &str) -> Option<&OptionValue> {
        self.values.get(id)
    }

    pub fn bool(&self, id: &str) -> Option<bool> {
        self.get(id).and_then(OptionValue::as_bool)
    }

    pub fn integer(&self, id: &str) -> Option<u64> {
        self.get(id).and_then(OptionValue::as_integer)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(OptionValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolved ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    /// One indentation level, at most [`MAX_INDENT_COUNT`] characters wide.
    pub fn indent(&self) -> String {
        let unit = if self.text(INDENT_TYPE) == Some("Tab") {
            "\t"
        } else {
            " "
        };
        let count = self.integer(INDENT_COUNT).unwrap_or(2).min(MAX_INDENT_COUNT);
        unit.repeat(usize::try_from(count).unwrap_or(2))
    }

    /// Timeout in milliseconds; 0 means none.
    pub fn request_timeout(&self) -> u64 {
        self.integer(REQUEST_TIMEOUT).unwrap_or(0)
    }

    pub fn follow_redirect(&self) -> bool {
        self.bool(FOLLOW_REDIRECT).unwrap_or(true)
    }

    pub fn trim_request_body(&self) -> bool {
        self.bool(TRIM_REQUEST_BODY).unwrap_or(false)
    }

    pub fn include_boilerplate(&self) -> bool {
        self.bool(INCLUDE_BOILERPLATE).unwrap_or(false)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════
