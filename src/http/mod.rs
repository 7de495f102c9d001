//! HTTP layer: request envelopes, the retrying transport, and
//! response wrappers

pub use envelope::{FilePart, RequestEnvelope};
pub use request::RequestBuilder;
pub use response::Response;
pub use retry::RetryConfig;

mod envelope;
mod request;
mod response;
pub mod retry;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
