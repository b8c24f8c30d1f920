//! The transport seam between the client and the network.
//!
//! A [`Transport`] takes a fully resolved request (method, relative path,
//! query pairs, headers, body) and returns the raw response. It never looks
//! at the status code; mapping non-2xx responses to [`ApiError`] happens in
//! the client.
//!
//! [`ApiError`]: crate::ApiError

mod http;

use std::future::Future;

use bytes::Bytes;
use reqwest::header::HeaderMap;

use crate::codec::MultipartForm;
use crate::error::TransportError;
use crate::method::RestMethod;

pub use http::HttpTransport;

/// The body of an outgoing request.
#[derive(Debug, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// An encoded JSON document.
    Json(Bytes),
    /// A `multipart/form-data` body, possibly streaming file content.
    Multipart(MultipartForm),
}

/// A request ready to be sent.
#[derive(Debug)]
pub struct TransportRequest {
    pub method: RestMethod,
    /// Path relative to the base URL, without a leading slash.
    pub path: String,
    /// Already flattened query pairs, in order.
    pub query: Vec<(String, String)>,
    /// Per-request headers, added on top of the transport's defaults.
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl TransportRequest {
    /// Creates a request with no query, headers or body.
    pub fn new(method: RestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// A raw response as received from the network.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TransportResponse {
    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests and returns raw responses.
///
/// Implementations own connection pooling, authentication and base URL
/// resolution. They must not retry or interpret status codes.
///
/// ## Examples
///
/// ```rust
/// use bytes::Bytes;
/// use increase_core::transport::{Transport, TransportRequest, TransportResponse};
/// use increase_core::TransportError;
///
/// struct Canned;
///
/// impl Transport for Canned {
///     async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
///         Ok(TransportResponse {
///             status: 200,
///             headers: Default::default(),
///             body: Bytes::from_static(b"{}"),
///         })
///     }
/// }
/// ```
pub trait Transport: Send + Sync + 'static {
    /// Sends one request.
    ///
    /// ## Errors
    ///
    /// Returns a [`TransportError`] if no response was received.
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = TransportRequest::new(RestMethod::Get, "accounts");
        assert!(request.query.is_empty());
        assert!(request.headers.is_empty());
        assert!(matches!(request.body, RequestBody::Empty));
    }

    #[test]
    fn test_response_success_range() {
        let mut response = TransportResponse {
            status: 204,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        };
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
        response.status = 199;
        assert!(!response.is_success());
    }
}
