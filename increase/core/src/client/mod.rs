//! Client configuration and request execution.
//!
//! - [`ClientConfig`] - API key, environment, base URL, timeout, default headers
//! - [`RequestOptions`] - Per-call headers, idempotency key and [`CancelSignal`]
//! - [`ApiClient`] - Executes one request per call and decodes the result

mod config;
mod executor;
mod options;

pub use config::{
    API_KEY_ENV, BASE_URL_ENV, ClientConfig, ClientConfigBuilder, ENVIRONMENT_ENV, Environment,
};
pub use executor::ApiClient;
pub use options::{CancelSignal, IDEMPOTENCY_KEY_HEADER, RequestOptions};
