//! API resource endpoints

pub mod files;

pub use files::{Files, UploadRequest, UploadRequestBuilder};
