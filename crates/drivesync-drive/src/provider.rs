//! DriveApiProvider - IDriveClient implementation for the Drive v3 API
//!
//! Wraps the [`DriveClient`] and delegates to the changes and client
//! modules to fulfil the [`IDriveClient`] port contract.
//!
//! ## Design Notes
//!
//! - Authentication is handled separately by [`RefreshGrant`]; the
//!   provider receives an already-authenticated client.
//! - All five port operations map one-to-one onto Drive endpoints, so
//!   this wrapper carries no state of its own.
//!
//! [`RefreshGrant`]: crate::auth::RefreshGrant

use anyhow::Result;

use drivesync_core::domain::change::{ChangePage, FileMetadata};
use drivesync_core::domain::newtypes::{FileId, PageToken};
use drivesync_core::ports::drive_client::IDriveClient;

use crate::changes;
use crate::client::DriveClient;

/// [`IDriveClient`] adapter backed by the Drive v3 REST API
pub struct DriveApiProvider {
    client: DriveClient,
}

impl DriveApiProvider {
    /// Creates a new provider around an authenticated client
    pub fn new(client: DriveClient) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying client
    pub fn client(&self) -> &DriveClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl IDriveClient for DriveApiProvider {
    async fn start_page_token(&self) -> Result<PageToken> {
        changes::start_page_token(&self.client).await
    }

    async fn list_changes(&self, cursor: &PageToken) -> Result<ChangePage> {
        changes::list_changes(&self.client, cursor).await
    }

    async fn get_metadata(&self, file_id: &FileId) -> Result<FileMetadata> {
        self.client.get_metadata(file_id).await
    }

    async fn download(&self, file_id: &FileId) -> Result<Vec<u8>> {
        self.client.download(file_id).await
    }

    async fn export(&self, file_id: &FileId, mime: &str) -> Result<Vec<u8>> {
        self.client.export(file_id, mime).await
    }
}
