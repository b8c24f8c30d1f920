//! reqwest-backed transport with tracing instrumentation.

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::Stream;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{Span, instrument};
use url::Url;

use super::{RequestBody, Transport, TransportRequest, TransportResponse};
use crate::client::ClientConfig;
use crate::codec::{FileSource, FileUpload, MultipartForm, PartBody};
use crate::error::{ConfigError, TransportError};

/// Size of each chunk read from a streamed upload.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Idle connections kept per host.
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Sends requests over HTTPS with `reqwest`.
///
/// Every request carries the bearer token, `Accept: application/json` and a
/// `User-Agent` naming this crate, plus any default headers from the
/// configuration.
///
/// ## Examples
///
/// ```rust,ignore
/// use increase_core::{ClientConfig, HttpTransport};
///
/// let config = ClientConfig::builder().api_key("secret").build()?;
/// let transport = HttpTransport::new(&config)?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpTransport {
    /// Builds a transport from a client configuration.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::InvalidHeader`] if the API key is not a valid header value
    /// - [`ConfigError::HttpClient`] if the HTTP client cannot be constructed
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::try_from(format!("Bearer {}", config.api_key()))
            .map_err(|e| ConfigError::invalid_header(AUTHORIZATION.as_str(), e))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("increase-rust/", env!("CARGO_PKG_VERSION"))),
        );
        for (name, value) in config.default_headers() {
            headers.insert(name.clone(), value.clone());
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            timeout: config.timeout(),
        })
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::Connection(format!("invalid URL for {path}: {e}")))
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            TransportError::Request(err)
        }
    }
}

impl Transport for HttpTransport {
    #[instrument(
        name = "increase_request",
        skip(self, request),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        Span::current().record("http.method", request.method.to_string().as_str());
        let url = self.resolve(&request.path)?;
        Span::current().record("http.url", url.as_str());

        let mut builder = self
            .client
            .request(request.method.to_reqwest(), url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body),
            RequestBody::Multipart(form) => builder.multipart(into_reqwest_form(form).await?),
        };

        let response = builder.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());
        let otel_status = if status.is_server_error() {
            "ERROR"
        } else if status.is_success() {
            "OK"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

/// Converts a form into reqwest parts, opening file sources as streams.
async fn into_reqwest_form(form: MultipartForm) -> Result<Form, TransportError> {
    let mut out = Form::new();
    for part in form.into_parts() {
        out = match part.body {
            PartBody::Text(value) => out.text(part.name, value),
            PartBody::File(upload) => out.part(part.name, file_part(upload).await?),
        };
    }
    Ok(out)
}

async fn file_part(upload: FileUpload) -> Result<Part, TransportError> {
    let (filename, content_type, source) = upload.into_parts();
    let part = match source {
        FileSource::Bytes(content) => {
            let len = content.len() as u64;
            Part::stream_with_length(reqwest::Body::from(content), len)
        }
        FileSource::Path(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .map_err(TransportError::Body)?;
            let len = file.metadata().await.map_err(TransportError::Body)?.len();
            Part::stream_with_length(reqwest::Body::wrap_stream(read_chunks(file)), len)
        }
        FileSource::Reader(reader) => Part::stream(reqwest::Body::wrap_stream(read_chunks(reader))),
    };
    let part = part.file_name(filename);
    match content_type {
        Some(mime) => part.mime_str(&mime).map_err(TransportError::Request),
        None => Ok(part),
    }
}

/// Yields the reader's content in chunks until end of stream.
fn read_chunks<R>(reader: R) -> impl Stream<Item = std::io::Result<Bytes>> + Send + Sync + 'static
where
    R: AsyncRead + Send + Sync + Unpin + 'static,
{
    futures::stream::try_unfold(reader, |mut reader| async move {
        let mut chunk = BytesMut::with_capacity(UPLOAD_CHUNK_SIZE);
        let read = reader.read_buf(&mut chunk).await?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some((chunk.freeze(), reader)))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig::builder()
            .api_key("test-key")
            .base_url(base_url)
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_relative_path() {
        let transport = HttpTransport::new(&config("https://api.example.com/v1")).unwrap();
        assert_eq!(
            transport.resolve("accounts/account_1").unwrap().as_str(),
            "https://api.example.com/v1/accounts/account_1"
        );
        assert_eq!(
            transport.resolve("/accounts").unwrap().as_str(),
            "https://api.example.com/v1/accounts"
        );
    }

    #[test]
    fn test_api_key_with_newline_is_rejected() {
        let config = ClientConfig::builder()
            .api_key("bad\nkey")
            .build()
            .unwrap();
        assert!(matches!(
            HttpTransport::new(&config),
            Err(ConfigError::InvalidHeader { .. })
        ));
    }

    #[tokio::test]
    async fn test_read_chunks_streams_whole_reader() {
        let content = vec![7u8; UPLOAD_CHUNK_SIZE * 2 + 5];
        let chunks: Vec<Bytes> = read_chunks(std::io::Cursor::new(content.clone()))
            .try_collect()
            .await
            .unwrap();
        assert!(chunks.len() >= 3);
        assert_eq!(chunks.concat(), content);
    }

    #[tokio::test]
    async fn test_missing_upload_path_is_body_error() {
        let upload = FileUpload::from_path("/definitely/not/here.pdf");
        let err = file_part(upload).await.unwrap_err();
        assert!(matches!(err, TransportError::Body(_)));
    }
}
