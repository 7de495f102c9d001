//! Request envelopes for the dispatch layer
//!
//! A [`RequestEnvelope`] describes one outgoing API call: method,
//! relative path, query parameters, and at most one payload kind
//! (a JSON body, or form fields plus file attachments). Validation of
//! the payload/method combination happens here, before any transport
//! work.

use http::Method;

use crate::error::{Error, Result};

/// An in-memory file attachment for a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form part name (the Files API expects `file`)
    pub name: String,
    /// File name reported to the server
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Create a new file part.
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// One outgoing API request, prior to dispatch.
///
/// JSON body and form data/file attachments are mutually exclusive:
/// exactly one payload kind must be present for POST/PUT/PATCH, and
/// none for GET/DELETE. [`RequestEnvelope::validate`] enforces this.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    /// HTTP method
    pub method: Method,
    /// Path relative to the configured base URL (e.g. `/{file_id}`)
    pub path: String,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// JSON body
    pub json: Option<serde_json::Value>,
    /// Form fields for a multipart body
    pub form: Option<Vec<(String, String)>>,
    /// File attachments for a multipart body
    pub files: Option<Vec<FilePart>>,
}

impl RequestEnvelope {
    /// Create an envelope with the given method and relative path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            json: None,
            form: None,
            files: None,
        }
    }

    /// Create a GET envelope.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST envelope.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PUT envelope.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a PATCH envelope.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Create a DELETE envelope.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Add a form field.
    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Add a file attachment.
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.get_or_insert_with(Vec::new).push(part);
        self
    }

    /// Validate the method/path/payload combination.
    ///
    /// Rules:
    /// - the relative path must be non-empty;
    /// - the method must be one of GET/POST/PUT/PATCH/DELETE;
    /// - GET and DELETE take query parameters only;
    /// - POST/PUT/PATCH require exactly one payload kind: a JSON body
    ///   or form data (fields and/or files), never both, never neither.
    pub fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::InvalidArguments(
                "a relative request path is required".to_string(),
            ));
        }

        if !is_supported(&self.method) {
            return Err(Error::UnsupportedMethod(self.method.to_string()));
        }

        let has_json = self.json.is_some();
        let has_form = self.form.is_some() || self.files.is_some();

        if self.method == Method::GET || self.method == Method::DELETE {
            if has_json || has_form {
                return Err(Error::InvalidPayload(format!(
                    "{} requests take query parameters only",
                    self.method
                )));
            }
            return Ok(());
        }

        if has_json && has_form {
            return Err(Error::InvalidPayload(
                "a JSON body and form data are mutually exclusive".to_string(),
            ));
        }
        if !has_json && !has_form {
            return Err(Error::InvalidPayload(format!(
                "{} requests require either a JSON body or form data",
                self.method
            )));
        }

        Ok(())
    }
}

fn is_supported(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
