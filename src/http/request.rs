//! HTTP request builder and retrying transport

use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

use super::envelope::FilePart;
use super::retry::{RetryConfig, calculate_retry_delay};
use super::Response;
use crate::error::Result;

/// Builder for HTTP requests.
///
/// Holds everything needed to (re)build the outgoing request, so a
/// retry reconstructs the request from owned parts instead of cloning
/// a half-consumed one. Multipart bodies are rebuilt per attempt for
/// the same reason.
///
/// Retries apply only to idempotent methods (GET, PUT, DELETE) on
/// connection errors, timeouts, and 5xx responses; 4xx responses are
/// never retried.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    multipart: Option<MultipartData>,
    timeout: Duration,
    pub(crate) max_retries: u32,
    pub(crate) retry_config: RetryConfig,
    pub(crate) http_client: Option<reqwest::Client>,
}

/// Owned multipart form contents, cloneable across retry attempts.
#[derive(Debug, Clone, Default)]
pub(crate) struct MultipartData {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartData {
    fn to_form(&self) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in &self.fields {
            form = form.text(key.clone(), value.clone());
        }
        for part in &self.files {
            form = form.part(
                part.name.clone(),
                reqwest::multipart::Part::bytes(part.bytes.clone())
                    .file_name(part.file_name.clone()),
            );
        }
        form
    }
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            multipart: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_config: RetryConfig::default(),
            http_client: None,
        }
    }

    /// Set the HTTP client to use.
    pub(crate) fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a header.
    ///
    /// # Panics
    ///
    /// Panics if the header name or value is invalid according to HTTP
    /// specifications.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key
            .into()
            .parse::<HeaderName>()
            .expect("invalid HTTP header name");
        let value = value
            .into()
            .parse::<HeaderValue>()
            .expect("invalid HTTP header value");
        self.headers.insert(key, value);
        self
    }

    /// Append query parameters.
    pub fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    /// Set a raw request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a multipart form body from owned fields and file parts.
    pub fn multipart(mut self, fields: Vec<(String, String)>, files: Vec<FilePart>) -> Self {
        self.multipart = Some(MultipartData { fields, files });
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set max retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set custom backoff pacing.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Send the request and get a response.
    ///
    /// Returns the final response for any HTTP status; callers convert
    /// error statuses via [`Response::parse_result`] or
    /// [`crate::error::Error::from_response`]. Transport failures after
    /// retries are exhausted surface as typed errors.
    pub async fn send(self) -> Result<Response> {
        let client = self.http_client.clone().ok_or_else(|| {
            crate::error::Error::HttpClient("no HTTP client configured".to_string())
        })?;

        let retry_allowed = is_idempotent(&self.method);
        let mut attempt: u32 = 0;
        let start_time = std::time::Instant::now();

        loop {
            let request = self.build_attempt(&client);

            match request.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    let headers = resp.headers().clone();
                    let body = resp
                        .bytes()
                        .await
                        .map_err(|e| crate::error::Error::Connection(e.to_string()))?
                        .to_vec();

                    let response =
                        Response::new(status, headers, body, attempt, start_time.elapsed());

                    if response.is_error() && retry_allowed && attempt < self.max_retries {
                        let error = crate::error::Error::from_response(
                            status.as_u16(),
                            &String::from_utf8_lossy(response.body()),
                            response.headers(),
                        );

                        if let Some(delay) =
                            calculate_retry_delay(&error, attempt, &self.retry_config)
                        {
                            tracing::warn!(
                                status = status.as_u16(),
                                attempt = attempt + 1,
                                "retrying request after transient failure"
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            continue;
                        }
                    }

                    return Ok(response);
                }
                Err(e) if e.is_timeout() => {
                    let timeout_error = crate::error::Error::Timeout(self.timeout);
                    if retry_allowed && attempt < self.max_retries {
                        if let Some(delay) =
                            calculate_retry_delay(&timeout_error, attempt, &self.retry_config)
                        {
                            tracing::warn!(attempt = attempt + 1, "retrying request after timeout");
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            continue;
                        }
                    }
                    return Err(timeout_error);
                }
                Err(e) => {
                    let error = crate::error::Error::Connection(e.to_string());
                    if retry_allowed && attempt < self.max_retries {
                        if let Some(delay) =
                            calculate_retry_delay(&error, attempt, &self.retry_config)
                        {
                            tracing::warn!(
                                attempt = attempt + 1,
                                "retrying request after connection error"
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            continue;
                        }
                    }
                    return Err(error);
                }
            }
        }
    }

    // Rebuild the reqwest request from owned parts for one attempt.
    fn build_attempt(&self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let mut request = client
            .request(self.method.clone(), self.url.clone())
            .timeout(self.timeout);

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        if let Some(body) = &self.body {
            request = request.body(body.clone());
        }
        if let Some(multipart) = &self.multipart {
            request = request.multipart(multipart.to_form());
        }

        request
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the timeout.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }
}

fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::PUT | Method::DELETE)
}
