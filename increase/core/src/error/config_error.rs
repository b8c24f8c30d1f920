//! Client configuration errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These occur while building a client, before any request is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was supplied and none was found in the environment.
    #[error("Missing API key (set INCREASE_API_KEY)")]
    MissingApiKey,

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header name or value is not valid HTTP.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// The header name as supplied.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// The environment name is not one of `production` or `sandbox`.
    #[error("Unknown environment: {0}")]
    InvalidEnvironment(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ConfigError {
    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        assert_eq!(
            ConfigError::MissingApiKey.to_string(),
            "Missing API key (set INCREASE_API_KEY)"
        );
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_invalid_header() {
        let err = ConfigError::invalid_header("X-Bad\n", "invalid character");
        assert!(err.to_string().starts_with("Invalid header X-Bad"));
    }
}
