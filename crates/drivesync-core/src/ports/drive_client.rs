//! Drive client port (driven/secondary port)
//!
//! Interface for everything the engine needs from the remote file store:
//! change-feed pagination, metadata lookup by id, and content retrieval
//! (verbatim download or export conversion). The primary implementation
//! targets Google Drive v3, but the trait is provider-agnostic.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific; the engine classifies them as transient or not via
//!   the adapter's error messages rather than a shared error enum.
//! - Transient network/auth failures must surface as errors, distinct from
//!   "no more pages" (a page with no `next_page_token`), so the engine can
//!   retry the former and stop cleanly on the latter.

use crate::domain::change::{ChangePage, FileMetadata};
use crate::domain::newtypes::{FileId, PageToken};

/// Port trait for remote Drive operations
#[async_trait::async_trait]
pub trait IDriveClient: Send + Sync {
    /// Acquires a fresh baseline token for the change feed
    ///
    /// Everything that changed before this token is out of scope; the
    /// first sync run stores it and returns without processing.
    async fn start_page_token(&self) -> anyhow::Result<PageToken>;

    /// Fetches one page of changes at the given cursor
    ///
    /// # Arguments
    /// * `cursor` - Position in the change feed (from the checkpoint
    ///   store or a previous page's continuation token)
    ///
    /// # Returns
    /// The page's records plus its continuation token(s)
    async fn list_changes(&self, cursor: &PageToken) -> anyhow::Result<ChangePage>;

    /// Retrieves metadata for a file or folder by id
    ///
    /// Used by the path resolver to walk ancestor chains and by the
    /// engine to resolve shortcut targets.
    async fn get_metadata(&self, file_id: &FileId) -> anyhow::Result<FileMetadata>;

    /// Downloads a binary file's content verbatim
    ///
    /// Fails for Google-native types, which have no byte representation;
    /// the export policy keeps those from reaching this call.
    async fn download(&self, file_id: &FileId) -> anyhow::Result<Vec<u8>>;

    /// Exports a Google Workspace document into the given interchange format
    ///
    /// # Arguments
    /// * `file_id` - The document to export
    /// * `mime` - Target MIME type from the export policy table
    async fn export(&self, file_id: &FileId, mime: &str) -> anyhow::Result<Vec<u8>>;
}
