//! Parameter encoding errors.

use thiserror::Error;

/// Errors while putting request parameters on the wire.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Query and form encoding need a struct or map at the top level.
    #[error("Cannot encode a {0} as top-level parameters")]
    UnsupportedTopLevel(&'static str),

    /// A value has no representation in the target format.
    #[error("Cannot encode {0} in query or form parameters")]
    UnsupportedType(&'static str),

    /// JSON body serialization failed.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// An identifier cannot stand as a single path segment.
    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    /// Error raised by a `Serialize` implementation.
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for EncodeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}
