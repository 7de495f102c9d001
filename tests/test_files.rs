//! Files resource tests
//!
//! Upload and delete against a mock server: multipart payload shape,
//! validation failures that must never reach the network, error-status
//! mapping, and retry behavior.

use assert_matches::assert_matches;
use filecms::{Error, UploadRequest};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{client_for, file_object, hubspot_error, retrying_client_for};

fn write_temp_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_upload_sends_multipart_form() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = write_temp_file(&dir, "a.png", b"png-bytes");

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("authorization", "Bearer pat-na1-test-token"))
        .and(body_string_contains("name=\"options\""))
        .and(body_string_contains("PUBLIC_INDEXABLE"))
        .and(body_string_contains("name=\"file_name\""))
        .and(body_string_contains("name=\"folderPath\""))
        .and(body_string_contains("/images"))
        .and(body_string_contains("filename=\"a.png\""))
        .and(body_string_contains("png-bytes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(file_object("123", "a", "png")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = UploadRequest::builder()
        .file_path(file_path)
        .folder_path("/images")
        .options(serde_json::json!({"access": "PUBLIC_INDEXABLE"}))
        .build()
        .unwrap();

    let file = client.files().upload(request).await.unwrap();
    assert_eq!(file.id, "123");
    assert_eq!(file.name.as_deref(), Some("a"));
}

#[tokio::test]
async fn test_upload_with_folder_id_and_explicit_name() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = write_temp_file(&dir, "original.pdf", b"%PDF-1.4");

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("name=\"folderId\""))
        .and(body_string_contains("42"))
        .and(body_string_contains("filename=\"renamed.pdf\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(file_object("9", "renamed", "pdf")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = UploadRequest::builder()
        .file_path(file_path)
        .folder_id("42")
        .file_name("renamed.pdf")
        .build()
        .unwrap();

    let file = client.files().upload(request).await.unwrap();
    assert_eq!(file.id, "9");
}

#[tokio::test]
async fn test_upload_empty_options_default_to_empty_object() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = write_temp_file(&dir, "a.png", b"png-bytes");

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("name=\"options\""))
        .and(body_string_contains("{}"))
        .respond_with(ResponseTemplate::new(201).set_body_json(file_object("1", "a", "png")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .files()
        .upload(UploadRequest::new(file_path))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_with_both_folder_targets_issues_no_request() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = write_temp_file(&dir, "a.png", b"png-bytes");

    let client = client_for(&server);
    let request = UploadRequest::builder()
        .file_path(file_path)
        .folder_path("/images")
        .folder_id("42")
        .build()
        .unwrap();

    let result = client.files().upload(request).await;

    assert_matches!(result, Err(Error::InvalidArguments(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_with_non_object_options_fails_before_file_open() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    // The file does not exist; a TypeMismatch (not FileNotFound) proves
    // options are validated before the open.
    let request = UploadRequest::builder()
        .file_path("missing-dir/a.png")
        .options(serde_json::json!("PUBLIC"))
        .build()
        .unwrap();

    let result = client.files().upload(request).await;

    assert_matches!(result, Err(Error::TypeMismatch(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_missing_file_issues_no_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let result = client
        .files()
        .upload(UploadRequest::new("definitely/not/here.png"))
        .await;

    assert_matches!(result, Err(Error::FileNotFound(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_maps_error_statuses() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = write_temp_file(&dir, "a.png", b"png-bytes");

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(hubspot_error("INVALID_AUTHENTICATION", "Invalid token")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.files().upload(UploadRequest::new(file_path)).await;

    match result.unwrap_err() {
        Error::Authentication(message) => assert_eq!(message, "Invalid token"),
        other => panic!("expected Authentication, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upload_is_not_retried_on_server_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file_path = write_temp_file(&dir, "a.png", b"png-bytes");

    // expect(1): a POST must go out exactly once even with retries
    // configured, because POST is not idempotent.
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(hubspot_error("INTERNAL_ERROR", "boom")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = retrying_client_for(&server, 3);
    let result = client.files().upload(UploadRequest::new(file_path)).await;

    assert_matches!(result, Err(Error::InternalServerError(_)));
}

#[tokio::test]
async fn test_delete_issues_delete_with_no_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/123"))
        .and(header("authorization", "Bearer pat-na1-test-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.files().delete("123").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_delete_with_empty_id_issues_no_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    assert_matches!(
        client.files().delete("").await,
        Err(Error::InvalidArguments(_))
    );
    assert_matches!(
        client.files().delete("   ").await,
        Err(Error::InvalidArguments(_))
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_maps_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/999"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(hubspot_error("OBJECT_NOT_FOUND", "File 999 does not exist")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.files().delete("999").await;

    match result.unwrap_err() {
        Error::NotFound(message) => assert_eq!(message, "File 999 does not exist"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_retries_transient_server_error() {
    let server = MockServer::start().await;

    // First attempt fails with a 500, the retry succeeds.
    Mock::given(method("DELETE"))
        .and(path("/123"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(hubspot_error("INTERNAL_ERROR", "boom")),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = retrying_client_for(&server, 2);
    client.files().delete("123").await.unwrap();
}

#[tokio::test]
async fn test_delete_does_not_retry_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/123"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(hubspot_error("RATE_LIMITS", "Too many requests"))
                .insert_header("retry-after", "7"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = retrying_client_for(&server, 3);
    let result = client.files().delete("123").await;

    match result.unwrap_err() {
        Error::RateLimit { retry_after, .. } => {
            assert_eq!(retry_after, Some(std::time::Duration::from_secs(7)));
        }
        other => panic!("expected RateLimit, got {other:?}"),
    }
}
