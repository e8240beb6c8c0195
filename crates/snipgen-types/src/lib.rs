//! Shared types for snipgen.
//!
//! This crate defines the request model consumed by every emitter: the
//! request line, structured URL, ordered headers and the body tagged union,
//! together with the error type shared by all pipeline stages.

mod error;
mod lenient;
pub mod request;
pub mod url;

pub use error::{ConvertError, ConvertResult};
pub use request::{
    Body, BodyMode, FileRef, FormParam, FormParamKind, Header, Request, UrlEncodedParam,
};
pub use url::{QueryParam, Url, UrlAuth};
