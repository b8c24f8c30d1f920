//! Runtime for the Increase API client.
//!
//! This crate holds everything the typed resources build on:
//!
//! - [`Field`] - Three-state presence (omitted, `null`, value) for PATCH-safe fields
//! - [`codec`] - JSON bodies with unknown-member preservation, bracketed query
//!   strings and multipart uploads
//! - [`transport`] - The [`Transport`] seam and its reqwest implementation
//! - [`ApiClient`] - One request per call, non-2xx mapped to [`ApiError`]
//! - [`pagination`] - [`Page`] and [`Pager`] over cursor-paginated lists
//! - [`error`] - The [`IncreaseError`] taxonomy
//!
//! ## Examples
//!
//! ```rust,ignore
//! use increase_core::{ApiClient, ClientConfig, Environment, RequestOptions};
//!
//! let config = ClientConfig::builder()
//!     .api_key(std::env::var("INCREASE_API_KEY")?)
//!     .environment(Environment::Sandbox)
//!     .build()?;
//! let client = ApiClient::new(config)?;
//!
//! let first = client
//!     .list::<_, serde_json::Value>("accounts", &(), &RequestOptions::default())
//!     .await?;
//! println!("{} accounts on the first page", first.len());
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod field;
pub mod method;
pub mod object;
pub mod pagination;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{
    ApiClient, CancelSignal, ClientConfig, ClientConfigBuilder, Environment, RequestOptions,
};
pub use codec::Extras;
pub use error::{ApiError, ConfigError, DecodeError, EncodeError, IncreaseError, TransportError};
pub use field::Field;
pub use method::RestMethod;
pub use object::ApiObject;
pub use pagination::{ListResponse, Page, PageRequest, Pager};
pub use transport::{HttpTransport, Transport};

/// Re-exports used by the exported macros.
#[doc(hidden)]
pub mod __private {
    pub use serde;
}
