//! # filecms
//!
//! A typed Rust client for the HubSpot Files v3 API.
//!
//! The client handles bearer authentication, base-URL prefixing, and
//! retries of transient failures, and exposes file upload and delete
//! operations with validation done locally, before any I/O.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use filecms::{Client, UploadRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("pat-na1-...");
//!
//!     let file = client.files()
//!         .upload(UploadRequest::builder()
//!             .file_path("a.png")
//!             .folder_path("/images")
//!             .options(serde_json::json!({"access": "PUBLIC_INDEXABLE"}))
//!             .build()?)
//!         .await?;
//!
//!     println!("uploaded as {}", file.id);
//!
//!     client.files().delete(&file.id).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{RequestEnvelope, Response};
pub use resources::{Files, UploadRequest};
pub use types::{File, FileAccess};

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod types;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use filecms::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, Error, Result,
        http::RequestEnvelope,
        resources::{Files, UploadRequest},
        types::{File, FileAccess},
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com/files/v3/files";
