//! Shared test fixtures
#![allow(dead_code)]

use std::time::Duration;

use filecms::http::RetryConfig;
use filecms::Client;
use wiremock::MockServer;

/// A client pointed at the mock server with retries disabled.
pub fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .access_token("pat-na1-test-token")
        .base_url(server.uri())
        .max_retries(0)
        .build()
        .unwrap()
}

/// A client pointed at the mock server with fast retry pacing.
pub fn retrying_client_for(server: &MockServer, max_retries: u32) -> Client {
    Client::builder()
        .access_token("pat-na1-test-token")
        .base_url(server.uri())
        .max_retries(max_retries)
        .retry(RetryConfig {
            initial_interval: Duration::from_millis(5),
            max_interval: Duration::from_millis(20),
            multiplier: 2.0,
            randomization_factor: 0.0,
        })
        .build()
        .unwrap()
}

/// A HubSpot file object as returned by the Files API.
pub fn file_object(id: &str, name: &str, extension: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "createdAt": "2024-05-10T12:30:00Z",
        "updatedAt": "2024-05-10T12:30:00Z",
        "archived": false,
        "name": name,
        "extension": extension,
        "path": format!("/{name}.{extension}"),
        "size": 1024,
        "type": "IMG",
        "url": format!("https://example.com/hubfs/{name}.{extension}"),
        "access": "PUBLIC_INDEXABLE"
    })
}

/// HubSpot's standard error envelope.
pub fn hubspot_error(category: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "error",
        "message": message,
        "correlationId": "aeb5f871-7f07-4993-9211-075dc63e7cbf",
        "category": category
    })
}
