//! Client configuration.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use strum::{Display, EnumString};
use url::Url;

use crate::error::ConfigError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "INCREASE_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "INCREASE_BASE_URL";
/// Environment variable selecting `production` or `sandbox`.
pub const ENVIRONMENT_ENV: &str = "INCREASE_ENVIRONMENT";

/// The Increase deployment to talk to.
///
/// ## Examples
///
/// ```rust
/// use increase_core::Environment;
///
/// let env: Environment = "sandbox".parse().unwrap();
/// assert_eq!(env.base_url(), "https://sandbox.increase.com");
/// assert_eq!(Environment::default(), Environment::Production);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    /// Live money movement.
    #[default]
    Production,
    /// Simulated money movement for testing.
    Sandbox,
}

impl Environment {
    /// Returns the base URL of the environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.increase.com",
            Self::Sandbox => "https://sandbox.increase.com",
        }
    }
}

/// Settings shared by every request a client sends.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Reads configuration from `INCREASE_API_KEY`, `INCREASE_BASE_URL` and
    /// `INCREASE_ENVIRONMENT`.
    ///
    /// `INCREASE_BASE_URL` wins over `INCREASE_ENVIRONMENT` when both are set.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingApiKey`] if `INCREASE_API_KEY` is unset or empty
    /// - [`ConfigError::InvalidEnvironment`] for an unknown environment name
    /// - [`ConfigError::InvalidUrl`] if the base URL does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(key) = non_empty(API_KEY_ENV) {
            builder = builder.api_key(key);
        }
        if let Some(env) = non_empty(ENVIRONMENT_ENV) {
            let environment = env
                .trim()
                .parse::<Environment>()
                .map_err(|_| ConfigError::InvalidEnvironment(env.clone()))?;
            builder = builder.environment(environment);
        }
        if let Some(url) = non_empty(BASE_URL_ENV) {
            builder = builder.base_url(url.trim());
        }
        builder.build()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The base URL; its path always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}

/// Builder for [`ClientConfig`].
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use increase_core::{ClientConfig, Environment};
///
/// let config = ClientConfig::builder()
///     .api_key("secret")
///     .environment(Environment::Sandbox)
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url().as_str(), "https://sandbox.increase.com/");
/// ```
#[derive(Debug)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    environment: Environment,
    base_url: Option<String>,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            environment: Environment::default(),
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfigBuilder {
    /// Sets the API key sent as a bearer token.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Selects the environment. Ignored when an explicit base URL is set.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the base URL, e.g. to point at a mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is not valid HTTP.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the configuration.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingApiKey`] if no API key was set
    /// - [`ConfigError::InvalidUrl`] if the base URL does not parse or cannot be a base
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw = self
            .base_url
            .unwrap_or_else(|| self.environment.base_url().to_string());
        let mut base_url = Url::parse(&raw)?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(ClientConfig {
            api_key,
            base_url,
            timeout: self.timeout,
            default_headers: self.default_headers,
        })
    }
}

/// Validates a header name and value pair.
pub(crate) fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let header_name =
        HeaderName::try_from(name).map_err(|e| ConfigError::invalid_header(name, e))?;
    let header_value =
        HeaderValue::try_from(value).map_err(|e| ConfigError::invalid_header(name, e))?;
    Ok((header_name, header_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::builder().api_key("key").build().unwrap();
        assert_eq!(config.base_url().as_str(), "https://api.increase.com/");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(config.default_headers().is_empty());
    }

    #[test]
    fn test_missing_api_key() {
        let err = ClientConfig::builder().build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = ClientConfig::builder().api_key("").build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_base_url_override_gets_trailing_slash() {
        let config = ClientConfig::builder()
            .api_key("key")
            .environment(Environment::Sandbox)
            .base_url("http://127.0.0.1:8080/v1")
            .build()
            .unwrap();
        assert_eq!(config.base_url().as_str(), "http://127.0.0.1:8080/v1/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ClientConfig::builder()
            .api_key("key")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_invalid_default_header() {
        let err = ClientConfig::builder()
            .default_header("bad header", "value")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeader { .. }));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::builder().api_key("super-secret").build().unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn test_from_lookup_sandbox() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "key"),
            (ENVIRONMENT_ENV, "Sandbox"),
        ]))
        .unwrap();
        assert_eq!(config.base_url().as_str(), "https://sandbox.increase.com/");
    }

    #[test]
    fn test_from_lookup_base_url_wins() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "key"),
            (ENVIRONMENT_ENV, "sandbox"),
            (BASE_URL_ENV, "http://localhost:9000"),
        ]))
        .unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:9000/");
    }

    #[test]
    fn test_from_lookup_errors() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = ClientConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "key"),
            (ENVIRONMENT_ENV, "staging"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvironment(ref e) if e == "staging"));
    }
}
