//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;

use crate::error::TransportError;
use crate::method::RestMethod;
use crate::transport::{RequestBody, Transport, TransportRequest, TransportResponse};

/// What a [`ScriptedTransport`] saw for one request.
#[derive(Debug, Clone)]
pub(crate) struct Seen {
    pub method: RestMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub json: Option<serde_json::Value>,
}

impl Seen {
    /// Returns the value of a query parameter, if sent.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Replays canned responses in order and records each request.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    seen: Mutex<Vec<Seen>>,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond(self, status: u16, body: serde_json::Value) -> Self {
        self.respond_raw(status, body.to_string())
    }

    pub fn respond_raw(self, status: u16, body: impl Into<Bytes>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(TransportResponse {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }));
        self
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let json = match &request.body {
            RequestBody::Json(bytes) => serde_json::from_slice(bytes).ok(),
            _ => None,
        };
        self.seen.lock().unwrap().push(Seen {
            method: request.method,
            path: request.path,
            query: request.query,
            headers: request.headers,
            json,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(TransportError::Connection("no scripted response".into())))
    }
}
