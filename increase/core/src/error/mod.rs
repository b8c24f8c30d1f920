//! Layered error types for the Increase client.
//!
//! The error hierarchy separates failures by where they happened:
//! - [`IncreaseError`] - Top-level error returned by every public operation
//! - [`TransportError`] - Network, timeout and cancellation failures
//! - [`ApiError`] - Non-2xx responses reported by the API itself
//! - [`DecodeError`] - Malformed or type-mismatched response bodies
//! - [`EncodeError`] - Parameters that cannot be put on the wire
//! - [`ConfigError`] - Client construction problems

mod api_error;
mod config_error;
mod decode_error;
mod encode_error;
mod increase_error;
mod transport_error;

pub use api_error::ApiError;
pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use encode_error::EncodeError;
pub use increase_error::IncreaseError;
pub use transport_error::TransportError;
