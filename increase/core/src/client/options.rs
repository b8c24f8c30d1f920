//! Per-request options and cancellation.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::sync::watch;

use super::config::parse_header;
use crate::error::ConfigError;

/// Header carrying the idempotency key of a `POST`.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// A clonable handle that aborts in-flight requests.
///
/// Cancelling affects only requests that are running or started afterwards
/// with this signal; data already returned stays valid.
///
/// ## Examples
///
/// ```rust
/// use increase_core::CancelSignal;
///
/// let signal = CancelSignal::new();
/// let handle = signal.clone();
/// assert!(!signal.is_cancelled());
/// handle.cancel();
/// assert!(signal.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Cancels every request using this signal.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Completes once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Options applied to a single call.
///
/// ## Examples
///
/// ```rust
/// use increase_core::{CancelSignal, RequestOptions};
///
/// let options = RequestOptions::new()
///     .idempotency_key("transfer-2024-06-01-rent")
///     .header("X-Request-Source", "payroll")
///     .unwrap()
///     .cancel_signal(CancelSignal::new());
/// assert_eq!(options.get_idempotency_key(), Some("transfer-2024-06-01-rent"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: HeaderMap,
    idempotency_key: Option<String>,
    cancel: Option<CancelSignal>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header to the request.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is not valid HTTP.
    pub fn header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets the `Idempotency-Key` header.
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Attaches a cancellation signal.
    pub fn cancel_signal(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn get_idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    pub fn get_cancel_signal(&self) -> Option<&CancelSignal> {
        self.cancel.as_ref()
    }

    /// Returns these options with every setting of `other` layered on top.
    pub fn merged_with(&self, other: &RequestOptions) -> RequestOptions {
        let mut merged = self.clone();
        for (name, value) in &other.headers {
            merged.headers.insert(name.clone(), value.clone());
        }
        if other.idempotency_key.is_some() {
            merged.idempotency_key = other.idempotency_key.clone();
        }
        if other.cancel.is_some() {
            merged.cancel = other.cancel.clone();
        }
        merged
    }

    /// Resolves the headers to send, including the idempotency key.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the idempotency key is not a
    /// valid header value.
    pub fn to_header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = self.headers.clone();
        if let Some(key) = &self.idempotency_key {
            let value = HeaderValue::try_from(key.as_str())
                .map_err(|e| ConfigError::invalid_header(IDEMPOTENCY_KEY_HEADER, e))?;
            headers.insert(HeaderName::from_static("idempotency-key"), value);
        }
        Ok(headers)
    }
}
