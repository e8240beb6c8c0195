//! Conversion error types.
//!
//! Only caller-contract violations are errors. Malformed request data is
//! normalized by the pipeline and never surfaces here.

use thiserror::Error;

/// Errors that can abort a conversion before any snippet is produced.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No emitter is registered under the requested id.
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// The request description could not be read as a request at all.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

/// Conversion result type alias.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_target_display() {
        let err = ConvertError::UnknownTarget("cobol-http".into());
        assert_eq!(err.to_string(), "unknown target: cobol-http");
    }

    #[test]
    fn invalid_request_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConvertError = serde_err.into();
        assert!(err.to_string().starts_with("invalid request: "));
    }
}
