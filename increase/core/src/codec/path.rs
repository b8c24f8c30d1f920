//! Escaping for identifiers placed in request paths.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::EncodeError;

/// Bytes escaped inside one path segment: everything a URL parser would
/// treat as a delimiter, plus `%` so that values are never double-decoded.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes `value` so it occupies exactly one path segment.
///
/// ## Errors
///
/// Returns [`EncodeError::InvalidPathSegment`] for an empty value and for
/// `.` or `..`, which a URL parser resolves away instead of keeping.
///
/// ## Examples
///
/// ```rust
/// use increase_core::codec::path_segment;
///
/// assert_eq!(path_segment("account_1").unwrap(), "account_1");
/// assert_eq!(path_segment("a/b?c").unwrap(), "a%2Fb%3Fc");
/// assert!(path_segment("..").is_err());
/// ```
pub fn path_segment(value: &str) -> Result<String, EncodeError> {
    if matches!(value, "" | "." | "..") {
        return Err(EncodeError::InvalidPathSegment(value.to_string()));
    }
    Ok(utf8_percent_encode(value, SEGMENT).to_string())
}
