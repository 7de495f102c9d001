//! Files API types
//!
//! Response models for the HubSpot Files v3 endpoint. HubSpot serializes
//! these camelCase; optional fields are omitted for archived or partial
//! objects, so most of the model is `Option`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file object returned by the Files API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier
    pub id: String,

    /// When the file was created
    pub created_at: DateTime<Utc>,

    /// When the file was last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Whether the file has been archived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    /// File name (without extension)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// File extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Path of the file in the file manager
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// ID of the containing folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,

    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// File type bucket (IMG, DOCUMENT, AUDIO, MOVIE, OTHER)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    /// URL of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Default hosting URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_hosting_url: Option<String>,

    /// File access level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<FileAccess>,
}

/// Access level of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileAccess {
    /// Visible to anyone with the URL and indexable by search engines
    PublicIndexable,
    /// Visible to anyone with the URL, hidden from search engines
    PublicNotIndexable,
    /// Requires authorization to view
    Private,
    /// Access levels introduced after this model was written
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_deserialization() {
        let json = r#"{
            "id": "123456789",
            "createdAt": "2024-05-10T12:30:00Z",
            "updatedAt": "2024-05-11T08:00:00Z",
            "archived": false,
            "name": "logo",
            "extension": "png",
            "path": "/images/logo.png",
            "parentFolderId": "98765",
            "size": 2048,
            "type": "IMG",
            "url": "https://example.com/hubfs/logo.png",
            "defaultHostingUrl": "https://example.com/hubfs/logo.png",
            "access": "PUBLIC_INDEXABLE"
        }"#;

        let file: File = serde_json::from_str(json).unwrap();
        assert_eq!(file.id, "123456789");
        assert_eq!(file.name.as_deref(), Some("logo"));
        assert_eq!(file.extension.as_deref(), Some("png"));
        assert_eq!(file.path.as_deref(), Some("/images/logo.png"));
        assert_eq!(file.parent_folder_id.as_deref(), Some("98765"));
        assert_eq!(file.size, Some(2048));
        assert_eq!(file.file_type.as_deref(), Some("IMG"));
        assert_eq!(file.access, Some(FileAccess::PublicIndexable));
    }

    #[test]
    fn test_file_minimal_object() {
        let json = r#"{
            "id": "1",
            "createdAt": "2024-05-10T12:30:00Z"
        }"#;

        let file: File = serde_json::from_str(json).unwrap();
        assert_eq!(file.id, "1");
        assert!(file.name.is_none());
        assert!(file.access.is_none());
    }

    #[test]
    fn test_file_access_serialization() {
        let json = serde_json::to_string(&FileAccess::Private).unwrap();
        assert_eq!(json, "\"PRIVATE\"");
    }

    #[test]
    fn test_file_access_unknown_value_falls_back() {
        let access: FileAccess = serde_json::from_str("\"HIDDEN_SOMETHING\"").unwrap();
        assert_eq!(access, FileAccess::Other);
    }
}
