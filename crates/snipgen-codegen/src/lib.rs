//! snipgen snippet emission engine.
//!
//! # Pipeline
//!
//! Every target runs the same stages, in this order:
//!
//! 1. [`options::validate`] resolves user overrides against the target's
//!    option schema.
//! 2. [`body::compile_body`] branches on the body mode and emits the payload
//!    construction code plus its metadata ([`BodyFragment`]).
//! 3. [`headers::compile_headers`] emits one entry per enabled header, after
//!    [`headers::effective_headers`] has added any inferred `Content-Type`.
//! 4. [`Target::assemble`] wraps the fragments in the target's boilerplate.
//!
//! Stages 2 and 3 are generic over a [`Grammar`]: targets contribute only
//! lexical rules (quoting, statement shapes, containers), never branching.
//!
//! # Escaping
//!
//! All text that reaches a string literal goes through [`sanitize::sanitize`]
//! with the context the literal lives in. Raw bodies become JSON string
//! literals, rewritten per target by [`sanitize::transcode_json_literal`].

pub mod body;
pub mod fragment;
pub mod grammar;
pub mod headers;
pub mod options;
pub mod sanitize;
pub mod target;
pub mod targets;

pub use body::compile_body;
pub use fragment::{BodyFragment, CodeBlock, HeaderFragment, Line};
pub use grammar::{FileField, Grammar, Quote};
pub use headers::{compile_headers, effective_headers};
pub use options::{validate, OptionDescriptor, OptionKind, OptionValue, ResolvedOptions};
pub use sanitize::{sanitize, Escape, JsonDialect};
pub use target::{Emission, Target};
