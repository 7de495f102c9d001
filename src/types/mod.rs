//! API data models

pub mod files;

pub use files::{File, FileAccess};
