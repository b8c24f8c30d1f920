//! Request execution.
//!
//! This module provides [`ApiClient`], which turns typed parameters into a
//! [`TransportRequest`], sends it through a [`Transport`] and maps the
//! response to a typed value or an [`IncreaseError`].

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ClientConfig, RequestOptions};
use crate::codec::{self, MultipartForm, query};
use crate::error::{ApiError, ConfigError, IncreaseError, TransportError};
use crate::method::RestMethod;
use crate::pagination::{Page, PageRequest, Pager};
use crate::transport::{HttpTransport, RequestBody, Transport, TransportRequest, TransportResponse};

/// Executes Increase API calls.
///
/// Cloning is cheap: clones share the same transport and connection pool.
/// Every call performs exactly one request. Non-2xx responses become
/// [`IncreaseError::Api`]; 2xx bodies are decoded into the requested type.
///
/// ## Examples
///
/// ```rust,ignore
/// use increase_core::{ApiClient, ClientConfig, RequestOptions};
///
/// let client = ApiClient::new(ClientConfig::from_env()?)?;
/// let group: serde_json::Value = client.get("groups/current", &RequestOptions::default()).await?;
/// ```
#[derive(Debug)]
pub struct ApiClient<T = HttpTransport> {
    transport: Arc<T>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl ApiClient<HttpTransport> {
    /// Creates a client that talks HTTPS with the given configuration.
    ///
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_transport(HttpTransport::new(&config)?))
    }

    /// Creates a client configured from `INCREASE_*` environment variables.
    ///
    /// ## Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client on top of any transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET path` and decode the response.
    ///
    /// ## Errors
    ///
    /// Returns [`IncreaseError::Transport`], [`IncreaseError::Api`] or
    /// [`IncreaseError::Decode`] depending on where the call failed.
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<R, IncreaseError> {
        self.execute(TransportRequest::new(RestMethod::Get, path), options)
            .await
    }

    /// `GET path?query` and decode the response.
    ///
    /// ## Errors
    ///
    /// As [`get`](Self::get), plus [`IncreaseError::Encode`] if `query`
    /// cannot be flattened.
    pub async fn get_with_query<Q, R>(
        &self,
        path: &str,
        query: &Q,
        options: &RequestOptions,
    ) -> Result<R, IncreaseError>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = TransportRequest::new(RestMethod::Get, path).with_query(query::to_pairs(query)?);
        self.execute(request, options).await
    }

    /// `POST path` with a JSON body.
    ///
    /// ## Errors
    ///
    /// As [`get_with_query`](Self::get_with_query).
    pub async fn post<B, R>(&self, path: &str, body: &B, options: &RequestOptions) -> Result<R, IncreaseError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute(json_request(RestMethod::Post, path, body)?, options)
            .await
    }

    /// `POST path` without a body, as used by actions like `close` or `approve`.
    ///
    /// ## Errors
    ///
    /// As [`get`](Self::get).
    pub async fn post_action<R: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<R, IncreaseError> {
        self.execute(TransportRequest::new(RestMethod::Post, path), options)
            .await
    }

    /// `PATCH path` with a JSON body.
    ///
    /// ## Errors
    ///
    /// As [`get_with_query`](Self::get_with_query).
    pub async fn patch<B, R>(&self, path: &str, body: &B, options: &RequestOptions) -> Result<R, IncreaseError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute(json_request(RestMethod::Patch, path, body)?, options)
            .await
    }

    /// `DELETE path` and decode the response.
    ///
    /// ## Errors
    ///
    /// As [`get`](Self::get).
    pub async fn delete<R: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<R, IncreaseError> {
        self.execute(TransportRequest::new(RestMethod::Delete, path), options)
            .await
    }

    /// `POST path` with a `multipart/form-data` body.
    ///
    /// ## Errors
    ///
    /// As [`get`](Self::get); a file that cannot be read while sending is a
    /// [`TransportError::Body`].
    pub async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
        options: &RequestOptions,
    ) -> Result<R, IncreaseError> {
        let request =
            TransportRequest::new(RestMethod::Post, path).with_body(RequestBody::Multipart(form));
        self.execute(request, options).await
    }

    /// Fetches the first page of a list endpoint.
    ///
    /// `query` is flattened once and reused for every later page with only
    /// the `cursor` replaced. No `limit` is added unless `query` sets one.
    ///
    /// ## Errors
    ///
    /// As [`get_with_query`](Self::get_with_query).
    pub async fn list<Q, R>(
        &self,
        path: &str,
        query: &Q,
        options: &RequestOptions,
    ) -> Result<Page<R, T>, IncreaseError>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = PageRequest::new(path, query, options.clone())?;
        Page::fetch(self.clone(), Arc::new(request), None).await
    }

    /// Prepares a lazy pager over a list endpoint without sending anything.
    ///
    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `query` cannot be flattened.
    pub fn list_auto_paging<Q, R>(
        &self,
        path: &str,
        query: &Q,
        options: &RequestOptions,
    ) -> Result<Pager<R, T>, IncreaseError>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = PageRequest::new(path, query, options.clone())?;
        Ok(Pager::new(self.clone(), Arc::new(request)))
    }

    /// Sends a prepared request and decodes a 2xx body.
    ///
    /// ## Errors
    ///
    /// See [`get`](Self::get).
    pub async fn execute<R: DeserializeOwned>(
        &self,
        request: TransportRequest,
        options: &RequestOptions,
    ) -> Result<R, IncreaseError> {
        let response = self.send(request, options).await?;
        Ok(codec::decode(&response.body)?)
    }

    /// Sends a prepared request and returns the raw 2xx response.
    ///
    /// ## Errors
    ///
    /// Returns [`IncreaseError::Api`] for any non-2xx status.
    pub async fn send(
        &self,
        mut request: TransportRequest,
        options: &RequestOptions,
    ) -> Result<TransportResponse, IncreaseError> {
        request.headers.extend(options.to_header_map()?);
        let method = request.method;
        let path = request.path.clone();
        debug!(%method, path = %path, query_pairs = request.query.len(), "sending request");

        let response = match options.get_cancel_signal() {
            Some(signal) => {
                if signal.is_cancelled() {
                    return Err(TransportError::Cancelled.into());
                }
                tokio::select! {
                    biased;
                    _ = signal.cancelled() => {
                        debug!(%method, path = %path, "request cancelled");
                        return Err(TransportError::Cancelled.into());
                    }
                    result = self.transport.send(request) => result?,
                }
            }
            None => self.transport.send(request).await?,
        };

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            warn!(
                %method,
                path = %path,
                status = err.status,
                code = err.code.as_deref().unwrap_or("unknown"),
                "API returned an error"
            );
            return Err(err.into());
        }
        Ok(response)
    }
}

fn json_request<B: Serialize + ?Sized>(
    method: RestMethod,
    path: &str,
    body: &B,
) -> Result<TransportRequest, IncreaseError> {
    let body = Bytes::from(codec::encode(body)?);
    Ok(TransportRequest::new(method, path).with_body(RequestBody::Json(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CancelSignal;
    use crate::test_support::ScriptedTransport;
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: String,
    }

    #[derive(Serialize)]
    struct Update {
        name: Option<String>,
    }

    #[tokio::test]
    async fn test_get_decodes_success() {
        let client = ApiClient::with_transport(
            ScriptedTransport::new().respond(200, serde_json::json!({ "id": "thing_1" })),
        );
        let thing: Thing = client
            .get("things/thing_1", &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(thing.id, "thing_1");

        let seen = client.transport().seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, RestMethod::Get);
        assert_eq!(seen[0].path, "things/thing_1");
    }

    #[tokio::test]
    async fn test_not_found_is_api_error() {
        let client = ApiClient::with_transport(ScriptedTransport::new().respond(
            404,
            serde_json::json!({ "status": 404, "error_code": "not_found" }),
        ));
        let err = client
            .get::<Thing>("things/missing", &RequestOptions::default())
            .await
            .unwrap_err();
        let api = err.as_api_error().expect("api error");
        assert_eq!(api.status, 404);
        assert_eq!(api.code.as_deref(), Some("not_found"));
        assert!(api.is_not_found());
        assert!(!err.is_transport());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_api_error_is_logged() {
        let client = ApiClient::with_transport(ScriptedTransport::new().respond(
            422,
            serde_json::json!({ "status": 422, "type": "invalid_operation_error" }),
        ));
        let _ = client
            .post_action::<Thing>("things/thing_1/close", &RequestOptions::default())
            .await;
        assert!(logs_contain("API returned an error"));
        assert!(logs_contain("invalid_operation_error"));
    }

    #[tokio::test]
    async fn test_bad_body_is_decode_error() {
        let client = ApiClient::with_transport(ScriptedTransport::new().respond_raw(200, "{\"id\": 7}"));
        let err = client
            .get::<Thing>("things/thing_1", &RequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, IncreaseError::Decode(ref d) if d.is_type_mismatch()));
    }

    #[tokio::test]
    async fn test_transport_error_is_surfaced_once() {
        let client = ApiClient::with_transport(
            ScriptedTransport::new().fail(TransportError::Connection("reset".into())),
        );
        let err = client
            .get::<Thing>("things/thing_1", &RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(client.transport().seen().len(), 1);
    }

    #[tokio::test]
    async fn test_patch_sends_json_and_idempotency_key() {
        let client = ApiClient::with_transport(
            ScriptedTransport::new().respond(200, serde_json::json!({ "id": "thing_1" })),
        );
        let options = RequestOptions::new().idempotency_key("key-1");
        let _: Thing = client
            .patch("things/thing_1", &Update { name: None }, &options)
            .await
            .unwrap();

        let seen = client.transport().seen();
        assert_eq!(seen[0].method, RestMethod::Patch);
        assert_eq!(seen[0].json, Some(serde_json::json!({ "name": null })));
        assert_eq!(seen[0].headers.get("idempotency-key").unwrap(), "key-1");
    }

    #[tokio::test]
    async fn test_pre_cancelled_signal_sends_nothing() {
        let client = ApiClient::with_transport(ScriptedTransport::new());
        let signal = CancelSignal::new();
        signal.cancel();
        let options = RequestOptions::new().cancel_signal(signal);
        let err = client
            .get::<Thing>("things/thing_1", &options)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(client.transport().seen().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_call() {
        let client = ApiClient::with_transport(
            ScriptedTransport::new()
                .with_delay(Duration::from_secs(30))
                .respond(200, serde_json::json!({ "id": "thing_1" })),
        );
        let signal = CancelSignal::new();
        let options = RequestOptions::new().cancel_signal(signal.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            signal.cancel();
        });
        let err = tokio::time::timeout(
            Duration::from_secs(5),
            client.get::<Thing>("things/thing_1", &options),
        )
        .await
        .expect("cancellation should win")
        .unwrap_err();
        canceller.await.unwrap();
        assert!(err.is_cancelled());
    }
}
