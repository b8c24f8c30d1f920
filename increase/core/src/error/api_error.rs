//! Errors reported by the API in non-2xx responses.

use std::fmt;

use serde_json::Value;

use crate::codec::Extras;

/// A non-success response decoded into a structured value.
///
/// The body is parsed leniently: `error_code` is preferred for [`code`](Self::code)
/// and the `type` member is used when it is absent. A body that is not a JSON
/// object is kept in [`raw_body`](Self::raw_body) and used as the message.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Machine-readable error code, such as `not_found`.
    pub code: Option<String>,
    /// Short human-readable summary.
    pub title: Option<String>,
    /// Longer explanation of the failure.
    pub detail: Option<String>,
    /// Members of the error body not listed above.
    pub extras: Extras,
    /// The undecoded response body.
    pub raw_body: String,
}

impl ApiError {
    /// Builds an error from a response status and body.
    ///
    /// The HTTP status always wins over a `status` member in the body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let raw_body = String::from_utf8_lossy(body).into_owned();
        let mut extras: Extras = serde_json::from_slice(body).unwrap_or_default();

        let body_status = match extras.get("status").and_then(Value::as_u64) {
            Some(body_status) => {
                extras.remove("status");
                Some(body_status)
            }
            None => None,
        };
        if body_status.is_some_and(|s| s != u64::from(status)) {
            tracing::debug!(status, body_status = ?body_status, "error body status disagrees with HTTP status");
        }

        let error_code = take_string(&mut extras, "error_code");
        let kind = take_string(&mut extras, "type");
        let title = take_string(&mut extras, "title");
        let detail = take_string(&mut extras, "detail");

        Self {
            status,
            code: error_code.or(kind),
            title,
            detail,
            extras,
            raw_body,
        }
    }

    /// Best available description of the error.
    pub fn message(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or(self.raw_body.as_str())
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns `true` for any 4xx response.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Returns `true` for any 5xx response.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

/// Removes a string member. Members of any other type stay in `extras`.
fn take_string(extras: &mut Extras, key: &str) -> Option<String> {
    match extras.remove(key)? {
        Value::String(value) => Some(value),
        Value::Null => None,
        other => {
            extras.insert(key.to_string(), other);
            None
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP {} ({}): {}",
            self.status,
            self.code.as_deref().unwrap_or("unknown"),
            self.message()
        )
    }
}

impl std::error::Error for ApiError {}
