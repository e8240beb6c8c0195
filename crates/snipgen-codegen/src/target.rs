//! The assembler contract every target satisfies.

use serde_json::{Map, Value};
use snipgen_types::Request;
use tracing::debug;

use crate::body::compile_body;
use crate::fragment::{BodyFragment, HeaderFragment};
use crate::grammar::Grammar;
use crate::headers::{compile_headers, effective_headers};
use crate::options::{validate, OptionDescriptor, ResolvedOptions};

/// Everything an assembler receives: the request plus every compiled part.
#[derive(Debug)]
pub struct Emission<'a> {
    pub request: &'a Request,
    pub options: ResolvedOptions,
    /// One indent unit.
    pub indent: String,
    pub body: BodyFragment,
    pub headers: HeaderFragment,
}

/// A code-generation target.
///
/// Implementors supply the grammar, the option schema and the assembly step;
/// [`Target::convert`] runs the shared pipeline in its fixed order: options,
/// body, headers, assembly.
pub trait Target: Grammar + Send + Sync {
    /// Stable identifier, e.g. `go-native`.
    fn id(&self) -> &'static str;

    /// Human readable name, e.g. `Go - Native`.
    fn label(&self) -> &'static str;

    fn options(&self) -> Vec<OptionDescriptor>;

    fn assemble(&self, emission: &Emission<'_>) -> String;

    fn convert(&self, request: &Request, user_options: &Map<String, Value>) -> String {
        let options = validate(user_options, &self.options());
        let indent = options.indent();
        let body = compile_body(self, request.body.as_ref(), options.trim_request_body());
        let headers = compile_headers(self, &effective_headers(request));
        debug!(
            target_id = self.id(),
            mode = %body.mode,
            headers = headers.len(),
            "assembling snippet"
        );
        self.assemble(&Emission {
            request,
            options,
            indent,
            body,
            headers,
        })
    }
}
