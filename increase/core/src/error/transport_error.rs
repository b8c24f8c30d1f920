//! Network and transport errors.

use thiserror::Error;

/// Failures that prevent a response from being received.
///
/// These are surfaced unchanged and never retried by the client.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed due to a network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// Failed to establish a connection or build the request URL.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The caller cancelled the in-flight request.
    #[error("Request cancelled")]
    Cancelled,

    /// An upload source could not be opened or read while sending.
    #[error("Failed to read request body: {0}")]
    Body(#[source] std::io::Error),
}

impl TransportError {
    /// Returns `true` if the request may have never reached the server.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Request(e) => e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Request(e) => e.is_timeout(),
            _ => false,
        }
    }
}
