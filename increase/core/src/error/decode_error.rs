//! Response decoding errors.

use serde_json::error::Category;
use thiserror::Error;

/// Errors while turning a response body into a typed value.
///
/// These are kept apart from [`ApiError`](super::ApiError): the server
/// answered successfully but the body did not match the declared shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not valid JSON.
    #[error("Malformed JSON: {0}")]
    Malformed(serde_json::Error),

    /// The JSON was valid but a value did not match the declared field shape.
    #[error("JSON type mismatch: {0}")]
    TypeMismatch(serde_json::Error),

    /// A body was expected but the response was empty.
    #[error("Empty response body")]
    EmptyBody,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::TypeMismatch(err),
            Category::Syntax | Category::Eof | Category::Io => Self::Malformed(err),
        }
    }
}

impl DecodeError {
    /// Returns `true` if the body was syntactically invalid.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Returns `true` if a field had the wrong JSON type.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch(_))
    }
}
