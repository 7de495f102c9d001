//! Configuration for the HubSpot Files client

use std::time::Duration;

use http::HeaderMap;
use secrecy::SecretString;

use crate::http::RetryConfig;

/// Configuration for the client.
///
/// All settings are fixed once the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Private-app access token for bearer authentication
    pub access_token: Option<SecretString>,

    /// Base URL for the Files API
    pub base_url: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// Maximum number of retries for transient failures of idempotent
    /// requests
    pub max_retries: u32,

    /// Backoff pacing between retry attempts
    pub retry: RetryConfig,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry: RetryConfig::default(),
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an access token.
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(SecretString::new(access_token.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored if present. Recognized variables:
    /// - `HUBSPOT_ACCESS_TOKEN` for authentication
    /// - `HUBSPOT_BASE_URL` for the API base URL
    /// - `HUBSPOT_TIMEOUT` for the request timeout (seconds)
    /// - `HUBSPOT_MAX_RETRIES` for the retry count
    ///
    /// # Errors
    ///
    /// Returns an error if `HUBSPOT_TIMEOUT` or `HUBSPOT_MAX_RETRIES`
    /// are set but are not valid numbers.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(access_token) = env::var("HUBSPOT_ACCESS_TOKEN") {
            config.access_token = Some(SecretString::new(access_token.into_boxed_str()));
        }

        if let Ok(base_url) = env::var("HUBSPOT_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("HUBSPOT_TIMEOUT") {
            let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
                crate::error::Error::InvalidArguments(format!(
                    "HUBSPOT_TIMEOUT must be a number of seconds, got: '{timeout_str}'"
                ))
            })?;
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(max_retries_str) = env::var("HUBSPOT_MAX_RETRIES") {
            let max_retries = max_retries_str.parse::<u32>().map_err(|_| {
                crate::error::Error::InvalidArguments(format!(
                    "HUBSPOT_MAX_RETRIES must be a number, got: '{max_retries_str}'"
                ))
            })?;
            config.max_retries = max_retries;
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking
    /// precedence where it differs from the defaults.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.access_token.is_some() {
            self.access_token = other.access_token;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout != Duration::from_secs(30) {
            self.timeout = other.timeout;
        }
        if other.max_retries != 3 {
            self.max_retries = other.max_retries;
        }
        if !other.default_headers.is_empty() {
            for (key, value) in other.default_headers.iter() {
                self.default_headers.insert(key.clone(), value.clone());
            }
        }

        self
    }
}

/// Builder for creating a `ClientConfig` with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access token.
    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.config.access_token = Some(SecretString::new(access_token.into().into_boxed_str()));
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the backoff pacing between retries.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Add a default header.
    ///
    /// # Panics
    ///
    /// Panics if the header name or value is invalid.
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key: http::HeaderName = key.into().parse().expect("invalid header name");
        let value: http::HeaderValue = value.into().parse().expect("invalid header value");
        self.config.default_headers.insert(key, value);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
