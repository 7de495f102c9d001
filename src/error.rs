//! Error types for the HubSpot Files client
//!
//! One `thiserror` enum covers the whole crate: local argument and
//! payload validation, transport failures, and API errors refined by
//! HTTP status.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the HubSpot Files client.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument is missing or mutually exclusive arguments
    /// were both supplied. Raised before any I/O.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A structured argument has the wrong shape (e.g. upload options
    /// that are not a JSON object). Raised before any I/O.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The local file to upload does not exist. The network is never
    /// contacted.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A request envelope carried both a JSON body and form data, or
    /// neither where one was required.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// HTTP method outside GET/POST/PUT/PATCH/DELETE.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// API returned a bad request error (400).
    #[error("bad request: {message}")]
    BadRequest {
        /// Error message from the API
        message: String,
        /// HubSpot error category, if the body parsed
        category: Option<String>,
    },

    /// Authentication failed (401).
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Permission denied (403).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Resource not found (404).
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (429). Never retried automatically; the
    /// `retry_after` hint is surfaced for callers.
    #[error("rate limit exceeded: {message}")]
    RateLimit {
        /// Time to wait before retrying, if the API provided one
        retry_after: Option<Duration>,
        /// Error message from the API
        message: String,
    },

    /// Internal server error (5xx).
    #[error("internal server error: {0}")]
    InternalServerError(String),

    /// Generic API error for status codes not covered above.
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// HubSpot error category, if the body parsed
        category: Option<String>,
        /// Correlation ID for support requests
        correlation_id: Option<String>,
    },

    /// Network or connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Failed to interpret an API response body.
    #[error("failed to parse API response: {0}")]
    ResponseValidation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an API error from an HTTP response status, body, and headers.
    ///
    /// The HubSpot error envelope
    /// (`{"status":"error","message":...,"correlationId":...,"category":...}`)
    /// is parsed when present; otherwise the raw body is used as the message.
    pub fn from_response(status: u16, body: &str, headers: &http::HeaderMap) -> Self {
        let parsed = serde_json::from_str::<HubSpotErrorBody>(body).ok();
        let (message, category, correlation_id) = match parsed {
            Some(e) => (e.message, e.category, e.correlation_id),
            None => (body.to_string(), None, None),
        };

        match status {
            400 => Error::BadRequest { message, category },
            401 => Error::Authentication(message),
            403 => Error::PermissionDenied(message),
            404 => Error::NotFound(message),
            429 => {
                let retry_after = headers
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);

                Error::RateLimit {
                    retry_after,
                    message,
                }
            }
            s if s >= 500 => Error::InternalServerError(message),
            _ => Error::ApiError {
                status,
                message,
                category,
                correlation_id,
            },
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only connection-level failures, timeouts, and 5xx responses
    /// qualify; 4xx responses (including 429) never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Connection(_) => true,
            Error::Timeout(_) => true,
            Error::InternalServerError(_) => true,
            Error::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get the retry delay hint if this is a rate limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        if let Error::RateLimit { retry_after, .. } = self {
            *retry_after
        } else {
            None
        }
    }
}

// HubSpot's standard error envelope.
#[derive(Debug, serde::Deserialize)]
struct HubSpotErrorBody {
    message: String,
    category: Option<String>,
    #[serde(rename = "correlationId")]
    correlation_id: Option<String>,
}
