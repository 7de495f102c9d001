//! HTTP response handling

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP response wrapper.
///
/// Carries the raw body plus request metadata (`retries_taken`,
/// `elapsed`) collected by the transport layer.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    /// Number of retries taken before this response (0 if none)
    pub retries_taken: u32,
    /// Time elapsed for the complete request/response cycle
    pub elapsed: std::time::Duration,
}

impl Response {
    /// Create a new response.
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
        retries_taken: u32,
        elapsed: std::time::Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            retries_taken,
            elapsed,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Get the body as a string.
    pub fn text(&self) -> Result<String, crate::error::Error> {
        String::from_utf8(self.body.clone())
            .map_err(|e| crate::error::Error::ResponseValidation(e.to_string()))
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, crate::error::Error> {
        serde_json::from_slice(&self.body).map_err(crate::error::Error::Serialization)
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response is an error (4xx or 5xx status).
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Parse a successful response, converting HTTP errors to typed errors.
    pub fn parse_result<T: DeserializeOwned>(self) -> Result<T, crate::error::Error> {
        if self.is_error() {
            return Err(crate::error::Error::from_response(
                self.status.as_u16(),
                &String::from_utf8_lossy(&self.body),
                &self.headers,
            ));
        }
        self.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn response(status: u16, body: &str) -> Response {
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body.as_bytes().to_vec(),
            0,
            std::time::Duration::from_millis(1),
        )
    }

    #[test]
    fn test_parse_result_success() {
        #[derive(serde::Deserialize)]
        struct Payload {
            id: String,
        }

        let parsed: Payload = response(200, r#"{"id":"123"}"#).parse_result().unwrap();
        assert_eq!(parsed.id, "123");
    }

    #[test]
    fn test_parse_result_maps_error_status() {
        let result: Result<serde_json::Value, _> =
            response(404, r#"{"status":"error","message":"missing"}"#).parse_result();

        match result.unwrap_err() {
            Error::NotFound(message) => assert_eq!(message, "missing"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_text_and_flags() {
        let resp = response(204, "");
        assert!(resp.is_success());
        assert!(!resp.is_error());
        assert_eq!(resp.text().unwrap(), "");
    }
}
