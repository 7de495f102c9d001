//! Main client implementation for the HubSpot Files API

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    DEFAULT_BASE_URL,
    config::ClientConfig,
    error::{Error, Result},
    http::{RequestBuilder, RequestEnvelope, Response, RetryConfig},
    resources::Files,
};

/// Client for the HubSpot Files API.
///
/// Handles bearer authentication, base-URL prefixing, and the retry
/// policy for every request. The client is a cheap handle over shared
/// state: cloning it is inexpensive, and because the underlying
/// `reqwest::Client` is `Send + Sync` with an internal connection
/// pool, a single instance may be shared freely across tasks and
/// threads.
///
/// # Example
///
/// ```rust,no_run
/// use filecms::Client;
///
/// let client = Client::new("pat-na1-...");
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// HTTP client for making requests
    http_client: reqwest::Client,
    /// Base URL every relative path is appended to
    base_url: Url,
    /// Access token for bearer authentication
    access_token: SecretString,
    /// Default timeout for requests
    timeout: Duration,
    /// Maximum number of retries
    max_retries: u32,
    /// Backoff pacing between retries
    retry: RetryConfig,
    /// Custom headers to include with every request
    default_headers: http::HeaderMap,

    // Lazily-initialized resources
    files: OnceLock<Files>,
}

impl Client {
    /// Create a new client with an access token.
    ///
    /// The token can also be loaded from the `HUBSPOT_ACCESS_TOKEN`
    /// environment variable if the `env` feature is enabled.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::builder()
            .access_token(access_token)
            .build()
            .expect("failed to build client with provided access token")
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("filecms-rust/{}", crate::VERSION))
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let base_url_string = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if base_url_string.trim().is_empty() {
            return Err(Error::InvalidUrl("base URL cannot be empty".to_string()));
        }

        let base_url: Url = base_url_string
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{e}")))?;

        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidUrl(format!(
                    "invalid URL scheme '{scheme}': only 'http' and 'https' are supported"
                )));
            }
        }

        let mut access_token = config.access_token;

        if access_token.is_none() {
            #[cfg(feature = "env")]
            {
                access_token = std::env::var("HUBSPOT_ACCESS_TOKEN")
                    .ok()
                    .map(|s| SecretString::new(s.into_boxed_str()));
            }
        }

        let access_token = access_token.ok_or_else(|| {
            Error::Authentication(
                "no access token provided; set HUBSPOT_ACCESS_TOKEN or pass one explicitly"
                    .to_string(),
            )
        })?;

        let inner = Arc::new(ClientInner {
            http_client,
            base_url,
            access_token,
            timeout: config.timeout,
            max_retries: config.max_retries,
            retry: config.retry,
            default_headers: config.default_headers,
            files: OnceLock::new(),
        });

        Ok(Self { inner })
    }

    /// Access file operations (upload, delete).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use filecms::{Client, UploadRequest};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new("pat-na1-...");
    ///
    /// let file = client.files()
    ///     .upload(UploadRequest::builder()
    ///         .file_path("report.pdf")
    ///         .folder_path("/reports")
    ///         .build()?)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn files(&self) -> &Files {
        self.inner.files.get_or_init(|| Files::new(self.clone()))
    }

    /// Validate and send a request envelope.
    ///
    /// This is the dispatch layer: the envelope is validated (payload
    /// exclusivity, supported method, non-empty path) and routed to
    /// the transport unchanged. GET/DELETE carry query parameters
    /// only; POST/PUT/PATCH carry either a JSON body or a multipart
    /// form.
    pub async fn dispatch(&self, envelope: RequestEnvelope) -> Result<Response> {
        envelope.validate()?;

        tracing::debug!(
            method = %envelope.method,
            path = %envelope.path,
            "dispatching request"
        );

        let mut builder = self.request(envelope.method.clone(), &envelope.path)?;

        if !envelope.query.is_empty() {
            builder = builder.query(envelope.query);
        }

        if let Some(json) = envelope.json {
            builder = builder
                .header("content-type", "application/json")
                .body(serde_json::to_vec(&json)?);
        } else if envelope.form.is_some() || envelope.files.is_some() {
            builder = builder.multipart(
                envelope.form.unwrap_or_default(),
                envelope.files.unwrap_or_default(),
            );
        }

        let response = builder.send().await?;

        tracing::debug!(status = response.status().as_u16(), "received response");

        Ok(response)
    }

    /// A short, loggable hint of the configured token.
    ///
    /// Only the first few characters are ever exposed; the full token
    /// is never surfaced by this crate.
    pub fn token_hint(&self) -> String {
        let token = self.inner.access_token.expose_secret();
        let prefix: String = token.chars().take(5).collect();
        format!("{prefix}...")
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    // Create a request builder with auth, default headers, timeout,
    // and retry policy pre-applied. The relative path is appended to
    // the base URL by concatenation, so `/{id}` lands under the
    // configured `/files/v3/files` prefix.
    fn request(&self, method: http::Method, path: &str) -> Result<RequestBuilder> {
        let target = format!(
            "{}{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path
        );
        let url: Url = target
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{e}: {target}")))?;

        let mut builder = RequestBuilder::new(method, url)
            .with_client(self.inner.http_client.clone())
            .timeout(self.inner.timeout)
            .max_retries(self.inner.max_retries)
            .retry_config(self.inner.retry.clone())
            .header(
                "authorization",
                format!("Bearer {}", self.inner.access_token.expose_secret()),
            );

        for (key, value) in &self.inner.default_headers {
            builder = builder.header(key.as_str(), value.to_str().unwrap_or(""));
        }

        Ok(builder)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("access_token", &self.token_hint())
            .field("max_retries", &self.inner.max_retries)
            .finish()
    }
}

/// Builder for creating a configured [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Set the access token for authentication.
    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.config.access_token = Some(SecretString::new(access_token.into().into_boxed_str()));
        self
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the default timeout for requests.
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

    /// Add a custom default header.
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

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config)
    }
}
