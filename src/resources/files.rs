//! Files resource: upload and delete
//!
//! Thin assemblers over the dispatch layer. All argument validation
//! happens here, before any file or network I/O.

use std::path::PathBuf;

use derive_builder::Builder;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::http::{FilePart, RequestEnvelope};
use crate::types::File;

/// Parameters for uploading a file.
///
/// `folder_path` and `folder_id` are mutually exclusive; `file_name`
/// defaults to the base name of `file_path`; `options` must be a JSON
/// object when present (e.g. `{"access": "PRIVATE"}`) and defaults to
/// an empty one.
///
/// # Example
///
/// ```rust,no_run
/// # use filecms::UploadRequest;
/// let request = UploadRequest::builder()
///     .file_path("a.png")
///     .folder_path("/images")
///     .options(serde_json::json!({"access": "PUBLIC_INDEXABLE"}))
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(setter(into, strip_option))]
pub struct UploadRequest {
    /// Path of the local file to upload
    pub file_path: PathBuf,

    /// Destination folder path (mutually exclusive with `folder_id`)
    #[builder(default)]
    pub folder_path: Option<String>,

    /// Destination folder ID (mutually exclusive with `folder_path`)
    #[builder(default)]
    pub folder_id: Option<String>,

    /// Name of the file on the CMS; defaults to the local base name
    #[builder(default)]
    pub file_name: Option<String>,

    /// Additional upload options, JSON-encoded into the form
    #[builder(default)]
    pub options: Option<serde_json::Value>,
}

impl UploadRequest {
    /// Create a builder for constructing an `UploadRequest`.
    pub fn builder() -> UploadRequestBuilder {
        UploadRequestBuilder::default()
    }

    /// Create a request with only the required file path.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            folder_path: None,
            folder_id: None,
            file_name: None,
            options: None,
        }
    }

    // Argument checks that need no I/O. Order matters: mutual
    // exclusivity first, then options shape, then the file name.
    fn validate(&self) -> Result<(String, serde_json::Value)> {
        if self.folder_path.is_some() && self.folder_id.is_some() {
            return Err(Error::InvalidArguments(
                "folder_path and folder_id are mutually exclusive".to_string(),
            ));
        }

        let options = match &self.options {
            Some(value) if !value.is_object() => {
                return Err(Error::TypeMismatch(
                    "options must be a JSON object".to_string(),
                ));
            }
            Some(value) => value.clone(),
            None => serde_json::json!({}),
        };

        let file_name = match &self.file_name {
            Some(name) => name.clone(),
            None => self
                .file_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    Error::InvalidArguments(format!(
                        "file_path has no file name: {}",
                        self.file_path.display()
                    ))
                })?,
        };

        Ok((file_name, options))
    }
}

/// Files resource.
///
/// Provides upload and delete operations against the Files API.
/// Reached via [`Client::files`].
#[derive(Clone)]
pub struct Files {
    client: Client,
}

impl Files {
    /// Create a new Files resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Upload a file.
    ///
    /// Issues a multipart `POST /` with fields `options` (JSON-encoded),
    /// `file_name`, an optional `folderId` or `folderPath`, and a file
    /// part named `file`. The local file handle is scoped to the read
    /// and closed on every exit path. A missing local file fails with
    /// [`Error::FileNotFound`] without touching the network; whether
    /// the destination folder exists is the server's call, not checked
    /// here.
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
    ///         .file_path("a.png")
    ///         .folder_path("/images")
    ///         .build()?)
    ///     .await?;
    /// println!("uploaded file {}", file.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload(&self, request: UploadRequest) -> Result<File> {
        let (file_name, options) = request.validate()?;

        let bytes = tokio::fs::read(&request.file_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(request.file_path.clone())
            } else {
                Error::Io(e)
            }
        })?;

        tracing::debug!(
            file_name = %file_name,
            size = bytes.len(),
            "uploading file"
        );

        let mut envelope = RequestEnvelope::post("/")
            .form_field("options", serde_json::to_string(&options)?)
            .form_field("file_name", file_name.clone());

        if let Some(folder_id) = &request.folder_id {
            envelope = envelope.form_field("folderId", folder_id.clone());
        }
        if let Some(folder_path) = &request.folder_path {
            envelope = envelope.form_field("folderPath", folder_path.clone());
        }

        envelope = envelope.file(FilePart::new("file", file_name, bytes));

        self.client.dispatch(envelope).await?.parse_result()
    }

    /// Delete a file by ID.
    ///
    /// Issues `DELETE /{file_id}` with no body. An empty `file_id`
    /// fails with [`Error::InvalidArguments`] before any network call.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use filecms::Client;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new("pat-na1-...");
    /// client.files().delete("123456789").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn delete(&self, file_id: &str) -> Result<()> {
        if file_id.trim().is_empty() {
            return Err(Error::InvalidArguments(
                "file_id is required".to_string(),
            ));
        }

        let response = self
            .client
            .dispatch(RequestEnvelope::delete(format!("/{file_id}")))
            .await?;

        if response.is_error() {
            return Err(Error::from_response(
                response.status().as_u16(),
                &String::from_utf8_lossy(response.body()),
                response.headers(),
            ));
        }

        Ok(())
    }
}
