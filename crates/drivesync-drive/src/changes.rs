//! Drive Changes API for incremental synchronization
//!
//! Implements the change-feed pattern for Google Drive, which provides
//! efficient incremental sync by returning only items that changed since a
//! stored page token.
//!
//! ## Change Feed Flow
//!
//! 1. **Baseline**: Call [`start_page_token`] once; everything before that
//!    token is out of scope
//! 2. **Incremental sync**: Call [`list_changes`] with the stored token to
//!    get one page of changes
//! 3. **Pagination**: While the page carries a `next_page_token`, the
//!    caller advances its checkpoint to it and fetches the next page
//! 4. **New baseline**: The final page carries a `new_start_page_token`
//!    which becomes the cursor for the next sync cycle
//!
//! Pages are fetched one at a time, never auto-followed: the sync engine
//! commits its checkpoint between pages, so each fetch must stay an
//! individually resumable step.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use drivesync_core::domain::change::{ChangePage, ChangeRecord};
use drivesync_core::domain::newtypes::PageToken;

use crate::client::{ApiFile, DriveClient};

/// Field mask for change-feed queries
///
/// Keeping the mask explicit pins the response shape; `shortcutDetails` is
/// needed so shortcuts can be resolved to their targets before upload.
const CHANGES_FIELDS: &str = "newStartPageToken,nextPageToken,\
changes(fileId,removed,file(name,mimeType,modifiedTime,trashed,parents,shortcutDetails))";

// ============================================================================
// Drive API response types (JSON deserialization)
// ============================================================================

/// Raw response from `GET /changes/startPageToken`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiStartPageToken {
    start_page_token: String,
}

/// Raw response from `GET /changes`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiChangeList {
    /// Change entries in feed order
    #[serde(default)]
    changes: Vec<ApiChange>,

    /// Token for the next page (present while more pages exist)
    next_page_token: Option<String>,

    /// Baseline token for the next sync cycle (present on the last page)
    new_start_page_token: Option<String>,
}

/// A single change entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiChange {
    /// Id of the file the change refers to
    #[serde(default)]
    file_id: String,

    /// Whether the file was removed from the Drive entirely
    #[serde(default)]
    removed: bool,

    /// File resource (absent for removed files)
    file: Option<ApiFile>,
}

// ============================================================================
// ChangeParser - converts Drive API responses to port-level types
// ============================================================================

/// Parser for converting Drive change responses into port-level types
struct ChangeParser;

impl ChangeParser {
    /// Parse a single change entry into a port-level [`ChangeRecord`]
    ///
    /// Removed files carry no file resource; their record keeps empty
    /// name/MIME fields and the `removed` flag tells the engine to skip.
    fn parse_change(change: ApiChange) -> ChangeRecord {
        match change.file {
            Some(file) => {
                let meta = file.into_metadata(&change.file_id);
                ChangeRecord {
                    file_id: change.file_id,
                    removed: change.removed,
                    name: meta.name,
                    mime_type: meta.mime_type,
                    modified: meta.modified,
                    trashed: meta.trashed,
                    parents: meta.parents,
                    shortcut_target: meta.shortcut_target,
                }
            }
            None => ChangeRecord {
                file_id: change.file_id,
                removed: change.removed,
                name: String::new(),
                mime_type: String::new(),
                modified: None,
                trashed: false,
                parents: Vec::new(),
                shortcut_target: None,
            },
        }
    }

    /// Parse a complete change list into a port-level [`ChangePage`]
    fn parse_page(list: ApiChangeList) -> Result<ChangePage> {
        let records = list.changes.into_iter().map(Self::parse_change).collect();

        let next_page_token = list
            .next_page_token
            .map(PageToken::new)
            .transpose()
            .context("Malformed nextPageToken in change response")?;
        let new_start_token = list
            .new_start_page_token
            .map(PageToken::new)
            .transpose()
            .context("Malformed newStartPageToken in change response")?;

        Ok(ChangePage {
            records,
            next_page_token,
            new_start_token,
        })
    }
}

/// Parse a saved change-feed response without touching the network
///
/// Accepts either a full `GET /changes` response body or a bare JSON array
/// of change entries. Used for offline inspection of captured responses.
pub fn parse_change_dump(json: &str) -> Result<Vec<ChangeRecord>> {
    let changes: Vec<ApiChange> = if json.trim_start().starts_with('[') {
        serde_json::from_str(json).context("Malformed change entry array")?
    } else {
        let list: ApiChangeList =
            serde_json::from_str(json).context("Malformed change list response")?;
        list.changes
    };
    Ok(changes.into_iter().map(ChangeParser::parse_change).collect())
}

// ============================================================================
// Change feed functions
// ============================================================================

/// Acquires a fresh baseline token for the change feed
///
/// Makes `GET /changes/startPageToken`. The returned token marks "now":
/// only changes after this point will ever be delivered against it.
///
/// # Errors
///
/// Returns an error if the HTTP request fails, the API returns a
/// non-success status, or the response cannot be parsed.
pub async fn start_page_token(client: &DriveClient) -> Result<PageToken> {
    debug!("Acquiring change-feed baseline token");

    let response = client
        .request(reqwest::Method::GET, "/changes/startPageToken")
        .query(&[("supportsAllDrives", "true")])
        .send()
        .await
        .context("Failed to send startPageToken request")?;

    let body: ApiStartPageToken = DriveClient::check(response)
        .await
        .context("startPageToken request returned error status")?
        .json()
        .await
        .context("Failed to parse startPageToken response JSON")?;

    PageToken::new(body.start_page_token).context("API returned an invalid start page token")
}

/// Fetches a single page of the change feed at the given cursor
///
/// # Arguments
///
/// * `client` - The authenticated [`DriveClient`]
/// * `cursor` - Stored cursor or a previous page's continuation token
///
/// # Returns
///
/// A [`ChangePage`] with the records plus the continuation token
/// (`next_page_token` while more pages remain, `new_start_token` on the
/// final page).
pub async fn list_changes(client: &DriveClient, cursor: &PageToken) -> Result<ChangePage> {
    debug!(cursor = cursor.as_str(), "Fetching change page");

    let response = client
        .request(reqwest::Method::GET, "/changes")
        .query(&[
            ("pageToken", cursor.as_str()),
            ("spaces", "drive"),
            ("includeItemsFromAllDrives", "true"),
            ("supportsAllDrives", "true"),
            ("fields", CHANGES_FIELDS),
        ])
        .send()
        .await
        .context("Failed to send changes request")?;

    let list: ApiChangeList = DriveClient::check(response)
        .await
        .context("Changes request returned error status")?
        .json()
        .await
        .context("Failed to parse changes response JSON")?;

    let page = ChangeParser::parse_page(list)?;

    debug!(
        records = page.records.len(),
        has_more = page.has_more(),
        "Received change page"
    );

    if page.commit_token().is_none() {
        warn!("Change page carries neither nextPageToken nor newStartPageToken");
    }

    Ok(page)
}

// ============================================================================
// Tests
// ============================================================================
