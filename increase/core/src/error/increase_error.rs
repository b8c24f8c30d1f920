//! Top-level error type.

use super::{ApiError, ConfigError, DecodeError, EncodeError, TransportError};
use thiserror::Error;

/// Top-level error type for all Increase operations.
///
/// Each variant wraps one layer of the taxonomy so callers can match on the
/// category they care about and ignore the rest.
///
/// ## Examples
///
/// ```rust,ignore
/// use increase_core::IncreaseError;
///
/// match client.accounts().retrieve("account_in71c4amph0vgo2qllky").await {
///     Ok(account) => println!("{account:?}"),
///     Err(IncreaseError::Api(e)) if e.is_not_found() => println!("no such account"),
///     Err(IncreaseError::Transport(e)) => eprintln!("network problem: {e}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum IncreaseError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The request parameters could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The client is misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A page cursor was read before a page was fetched or past its last item.
    #[error("Cursor position {index} is out of range for a page of {len} items")]
    OutOfRange {
        /// The position that was requested.
        index: usize,
        /// The number of items available.
        len: usize,
    },
}

impl IncreaseError {
    /// Returns the API error if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the failure happened before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the call was aborted through a cancel signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Cancelled))
    }
}
