//! The request model consumed by every emitter.
//!
//! The JSON shape follows the collection format most HTTP tools export:
//!
//! ```json
//! {
//!   "method": "POST",
//!   "url": "https://postman-echo.com/post?a=1",
//!   "header": [{ "key": "Accept", "value": "*/*" }],
//!   "body": { "mode": "urlencoded", "urlencoded": [{ "key": "x", "value": "1" }] }
//! }
//! ```
//!
//! Decoding is permissive: wrong-typed text fields become `None`, unknown
//! body modes become [`Body::Empty`], and list elements that do not decode are
//! dropped. The model is read-only input to the emitters.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::lenient;
use crate::url::Url;

// ══════════════════════════════════════════════════════════════════════════════
// Request
// ══════════════════════════════════════════════════════════════════════════════

/// A normalized HTTP request description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Request {
    /// Upper-cased HTTP verb. Defaults to `GET`.
    #[serde(default = "default_method", deserialize_with = "method")]
    pub method: String,
    #[serde(default)]
    pub url: Url,
    /// Ordered header list, disabled entries included.
    #[serde(default, alias = "headers", deserialize_with = "lenient::list")]
    pub header: Vec<Header>,
    #[serde(default)]
    pub body: Option<Body>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn method<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::text(deserializer)?
        .map(|m| m.trim().to_ascii_uppercase())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(default_method))
}

impl Request {
    /// Create a request with no headers and no body.
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            url,
            header: Vec::new(),
            body: None,
        }
    }

    /// Decode a request from its JSON description.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Append a header.
    pub fn with_header(mut self, header: Header) -> Self {
        self.header.push(header);
        self
    }

    /// Attach a body.
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// The body mode, [`BodyMode::Empty`] when there is no body.
    pub fn body_mode(&self) -> BodyMode {
        self.body.as_ref().map_or(BodyMode::Empty, Body::mode)
    }

    /// Whether an enabled header with this name exists (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.header.iter().any(|h| {
            !h.disabled
                && h.key
                    .as_deref()
                    .is_some_and(|k| k.trim().eq_ignore_ascii_case(name))
        })
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Headers
// ══════════════════════════════════════════════════════════════════════════════

/// A single header entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Header {
    #[serde(default, deserialize_with = "lenient::text")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub disabled: bool,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            disabled: false,
        }
    }

    /// Mark the entry disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Body
// ══════════════════════════════════════════════════════════════════════════════

/// The body discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    Empty,
    Raw,
    UrlEncoded,
    FormData,
    File,
}

impl fmt::Display for BodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Raw => write!(f, "raw"),
            Self::UrlEncoded => write!(f, "urlencoded"),
            Self::FormData => write!(f, "formdata"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Request payload, tagged by mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// No body, or a mode this engine does not recognise.
    Empty,
    /// A single text payload.
    Raw(String),
    /// Ordered `key=value` pairs.
    UrlEncoded(Vec<UrlEncodedParam>),
    /// Ordered multipart fields.
    FormData(Vec<FormParam>),
    /// The whole body is the content of a file.
    File(FileRef),
}

impl Body {
    pub fn mode(&self) -> BodyMode {
        match self {
            Self::Empty => BodyMode::Empty,
            Self::Raw(_) => BodyMode::Raw,
            Self::UrlEncoded(_) => BodyMode::UrlEncoded,
            Self::FormData(_) => BodyMode::FormData,
            Self::File(_) => BodyMode::File,
        }
    }
}

/// The wire shape: a `mode` plus one field per mode.
#[derive(Debug, Default, Deserialize)]
struct BodyRepr {
    #[serde(default, deserialize_with = "lenient::text")]
    mode: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    raw: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    urlencoded: Vec<UrlEncodedParam>,
    #[serde(default, deserialize_with = "lenient::list")]
    formdata: Vec<FormParam>,
    #[serde(default)]
    file: Option<Value>,
}

impl From<BodyRepr> for Body {
    fn from(repr: BodyRepr) -> Self {
        match repr.mode.as_deref() {
            Some("raw") => repr.raw.map_or(Body::Empty, Body::Raw),
            Some("urlencoded") => Body::UrlEncoded(repr.urlencoded),
            Some("formdata") => Body::FormData(repr.formdata),
            Some("file") => Body::File(
                repr.file
                    .and_then(|f| serde_json::from_value(f).ok())
                    .unwrap_or_default(),
            ),
            _ => Body::Empty,
        }
    }
}

impl<'de> Deserialize<'de> for Body {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let repr: BodyRepr = serde_json::from_value(value).unwrap_or_default();
        Ok(repr.into())
    }
}

/// One `application/x-www-form-urlencoded` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlEncodedParam {
    #[serde(default, deserialize_with = "lenient::text")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub disabled: bool,
}

impl UrlEncodedParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Whether a multipart field carries text or a file reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormParamKind {
    #[default]
    Text,
    File,
}

fn form_param_kind<'de, D>(deserializer: D) -> Result<FormParamKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match lenient::text(deserializer)?.as_deref() {
        Some("file") => FormParamKind::File,
        _ => FormParamKind::Text,
    })
}

/// One multipart field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormParam {
    #[serde(default, deserialize_with = "lenient::text")]
    pub key: Option<String>,
    /// Field text (text fields).
    #[serde(default, deserialize_with = "lenient::text")]
    pub value: Option<String>,
    /// Source path (file fields).
    #[serde(default, deserialize_with = "lenient::text")]
    pub src: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "form_param_kind")]
    pub kind: FormParamKind,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub disabled: bool,
}

impl FormParam {
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            src: None,
            kind: FormParamKind::Text,
            disabled: false,
        }
    }

    pub fn file(key: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: None,
            src: Some(src.into()),
            kind: FormParamKind::File,
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Reference to the file whose content forms the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileRef {
    #[serde(default, deserialize_with = "lenient::text")]
    pub src: Option<String>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════
