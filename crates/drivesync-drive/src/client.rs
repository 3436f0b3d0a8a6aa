//! Google Drive API client
//!
//! Provides a typed HTTP client for the Drive v3 REST API. Handles bearer
//! authentication, endpoint construction, JSON deserialization, and
//! mapping of error statuses onto [`DriveError`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use drivesync_drive::client::DriveClient;
//! use drivesync_core::domain::newtypes::FileId;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = DriveClient::new("access-token");
//! let meta = client.get_metadata(&"1AbC".parse::<FileId>()?).await?;
//! println!("{} ({})", meta.name, meta.mime_type);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use drivesync_core::domain::change::FileMetadata;
use drivesync_core::domain::newtypes::FileId;

use crate::DriveError;

/// Base URL for the Drive v3 API
const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Field mask requested for by-id metadata lookups
const METADATA_FIELDS: &str = "id,name,mimeType,modifiedTime,trashed,parents,shortcutDetails";

/// Fallback Retry-After when a 429 response carries no header
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(30);

// ============================================================================
// Drive API response types (JSON deserialization)
// ============================================================================

/// A file resource from the Drive API
///
/// Shared between metadata lookups and the change feed; fields use
/// camelCase to match the JSON format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiFile {
    /// File id (absent in change-feed entries, present for lookups)
    #[serde(default)]
    pub id: Option<String>,

    /// File or folder name
    #[serde(default)]
    pub name: String,

    /// Native MIME type
    #[serde(default)]
    pub mime_type: String,

    /// Last modified time in RFC 3339 format
    pub modified_time: Option<chrono::DateTime<chrono::Utc>>,

    /// Whether the file sits in the trash
    #[serde(default)]
    pub trashed: bool,

    /// Parent folder ids, primary parent first
    #[serde(default)]
    pub parents: Vec<String>,

    /// Shortcut facet (present if the item is a shortcut)
    pub shortcut_details: Option<ApiShortcutDetails>,
}

/// Shortcut facet pointing at the target file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiShortcutDetails {
    /// Id of the file the shortcut points to
    pub target_id: Option<String>,
}

impl ApiFile {
    /// Convert into the port-level [`FileMetadata`] DTO
    ///
    /// `fallback_id` covers responses where the file resource omits its
    /// own id (the change feed carries it one level up).
    pub(crate) fn into_metadata(self, fallback_id: &str) -> FileMetadata {
        FileMetadata {
            id: self.id.unwrap_or_else(|| fallback_id.to_string()),
            name: self.name,
            mime_type: self.mime_type,
            modified: self.modified_time,
            trashed: self.trashed,
            parents: self.parents,
            shortcut_target: self.shortcut_details.and_then(|sd| sd.target_id),
        }
    }
}

// ============================================================================
// DriveClient
// ============================================================================

/// HTTP client for Drive v3 API calls
///
/// Wraps `reqwest::Client` with bearer authentication and base URL
/// construction. The base URL can be overridden for tests against a mock
/// server.
pub struct DriveClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// Current OAuth2 access token
    access_token: String,
}

impl DriveClient {
    /// Creates a new DriveClient with the given access token
    ///
    /// # Arguments
    /// * `access_token` - A valid OAuth2 access token for the Drive API
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DRIVE_BASE_URL.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Creates a new DriveClient with a custom base URL (useful for testing)
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Returns a reference to the current access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// Automatically prepends the base URL and adds the Authorization header.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to base URL (e.g., "/changes")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }

    /// Maps an error status onto [`DriveError`]; passes success through
    pub(crate) async fn check(response: Response) -> Result<Response, DriveError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_RETRY_AFTER);
            return Err(DriveError::RateLimited { retry_after });
        }

        let message = response.text().await.unwrap_or_default();
        Err(DriveError::from_status(status, message))
    }

    /// Retrieves metadata for a file or folder by id
    ///
    /// Makes `GET /files/{id}` with the standard field mask and all-drives
    /// support enabled.
    pub async fn get_metadata(&self, file_id: &FileId) -> Result<FileMetadata> {
        let path = format!("/files/{}", file_id.as_str());
        debug!(file_id = file_id.as_str(), "Fetching file metadata");

        let response = self
            .request(Method::GET, &path)
            .query(&[("fields", METADATA_FIELDS), ("supportsAllDrives", "true")])
            .send()
            .await
            .context("Failed to send metadata request")?;

        let file: ApiFile = Self::check(response)
            .await
            .context("Metadata request returned error status")?
            .json()
            .await
            .context("Failed to parse metadata response JSON")?;

        Ok(file.into_metadata(file_id.as_str()))
    }

    /// Downloads a binary file's content
    ///
    /// Makes `GET /files/{id}?alt=media`, which returns the raw bytes.
    /// Google-native types cannot be fetched this way (the API answers
    /// 403); the export policy keeps them from reaching this call.
    pub async fn download(&self, file_id: &FileId) -> Result<Vec<u8>> {
        let path = format!("/files/{}", file_id.as_str());
        debug!(file_id = file_id.as_str(), "Downloading file content");

        let response = self
            .request(Method::GET, &path)
            .query(&[("alt", "media"), ("supportsAllDrives", "true")])
            .send()
            .await
            .context("Failed to send download request")?;

        let bytes = Self::check(response)
            .await
            .context("Download request returned error status")?
            .bytes()
            .await
            .context("Failed to read download response body")?;

        debug!(
            file_id = file_id.as_str(),
            bytes = bytes.len(),
            "Download complete"
        );
        Ok(bytes.to_vec())
    }

    /// Exports a Workspace document into a downloadable interchange format
    ///
    /// Makes `GET /files/{id}/export?mimeType={mime}`.
    ///
    /// # Arguments
    /// * `file_id` - The document to export
    /// * `mime` - Target MIME type (from the export policy table)
    pub async fn export(&self, file_id: &FileId, mime: &str) -> Result<Vec<u8>> {
        let path = format!("/files/{}/export", file_id.as_str());
        debug!(file_id = file_id.as_str(), mime, "Exporting document");

        let response = self
            .request(Method::GET, &path)
            .query(&[("mimeType", mime)])
            .send()
            .await
            .context("Failed to send export request")?;

        let bytes = Self::check(response)
            .await
            .context("Export request returned error status")?
            .bytes()
            .await
            .context("Failed to read export response body")?;

        debug!(
            file_id = file_id.as_str(),
            bytes = bytes.len(),
            "Export complete"
        );
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_client_creation() {
        let client = DriveClient::new("test-token");
        assert_eq!(client.access_token(), "test-token");
        assert_eq!(client.base_url(), DRIVE_BASE_URL);
    }

    #[test]
    fn test_request_builder() {
        let client = DriveClient::new("test-token");
        let request = client.request(Method::GET, "/changes").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://www.googleapis.com/drive/v3/changes"
        );
        let auth_header = request
            .headers()
            .get("authorization")
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(auth_header, "Bearer test-token");
    }

    #[test]
    fn test_custom_base_url() {
        let client = DriveClient::with_base_url("token", "http://localhost:8080");
        let request = client.request(Method::GET, "/changes").build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8080/changes");
    }

    #[test]
    fn test_api_file_deserialization() {
        let json = r#"{
            "id": "file-001",
            "name": "report.pdf",
            "mimeType": "application/pdf",
            "modifiedTime": "2026-01-15T10:30:00.000Z",
            "trashed": false,
            "parents": ["folder-001"]
        }"#;

        let file: ApiFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.id.as_deref(), Some("file-001"));
        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert!(!file.trashed);
        assert_eq!(file.parents, vec!["folder-001".to_string()]);
        assert!(file.shortcut_details.is_none());
    }

    #[test]
    fn test_api_file_shortcut_facet() {
        let json = r#"{
            "name": "link to report",
            "mimeType": "application/vnd.google-apps.shortcut",
            "shortcutDetails": { "targetId": "target-001" }
        }"#;

        let file: ApiFile = serde_json::from_str(json).unwrap();
        let meta = file.into_metadata("shortcut-id");
        assert_eq!(meta.id, "shortcut-id");
        assert_eq!(meta.shortcut_target.as_deref(), Some("target-001"));
    }

    #[test]
    fn test_api_file_minimal() {
        // Removed files come with almost nothing populated
        let file: ApiFile = serde_json::from_str("{}").unwrap();
        let meta = file.into_metadata("fallback");
        assert_eq!(meta.id, "fallback");
        assert_eq!(meta.name, "");
        assert!(meta.parents.is_empty());
        assert!(meta.modified.is_none());
    }
}
