//! Change-feed data model
//!
//! These are port-level DTOs representing raw data from the Drive change
//! feed and metadata endpoints. The engine maps them onto domain decisions
//! (export classification, path resolution) per record.
//!
//! A [`ChangeRecord`] is immutable once received and consumed exactly once
//! per sync pass, unless a prior pass failed before checkpoint advancement,
//! in which case the whole page is re-delivered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::newtypes::PageToken;

/// A single record from the Drive change feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Drive file id the change refers to
    pub file_id: String,
    /// Whether the file was removed from the Drive entirely
    pub removed: bool,
    /// File name at the time of the change (empty for removed files)
    pub name: String,
    /// Native MIME type (empty for removed files)
    pub mime_type: String,
    /// Last modified timestamp, if the API supplied one
    pub modified: Option<DateTime<Utc>>,
    /// Whether the file sits in the Drive trash
    pub trashed: bool,
    /// Parent folder ids, primary parent first
    pub parents: Vec<String>,
    /// Target file id if this item is a Drive shortcut
    pub shortcut_target: Option<String>,
}

/// Metadata for a single file or folder, as returned by a by-id lookup
///
/// Used by the path resolver to walk the ancestor chain and by the engine
/// to resolve shortcut targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Drive file id
    pub id: String,
    /// File or folder name
    pub name: String,
    /// Native MIME type
    pub mime_type: String,
    /// Last modified timestamp
    pub modified: Option<DateTime<Utc>>,
    /// Whether the item sits in the Drive trash
    pub trashed: bool,
    /// Parent folder ids, primary parent first
    pub parents: Vec<String>,
    /// Target file id if this item is a Drive shortcut
    pub shortcut_target: Option<String>,
}

/// One page of the change feed
///
/// Exactly one of `next_page_token` / `new_start_token` is expected per
/// page: the former while more pages remain, the latter on the final page
/// (it becomes the baseline for the next invocation).
#[derive(Debug, Clone)]
pub struct ChangePage {
    /// Change records in feed order
    pub records: Vec<ChangeRecord>,
    /// Token for the next page (present while more pages remain)
    pub next_page_token: Option<PageToken>,
    /// Baseline token for the next sync cycle (present on the last page)
    pub new_start_token: Option<PageToken>,
}

impl ChangePage {
    /// Returns true if more pages remain after this one
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }

    /// The cursor value to persist once this page is fully processed
    ///
    /// While more pages remain this is the next page token; on the final
    /// page it is the fresh baseline token. `None` only occurs on a
    /// malformed response that carries neither.
    #[must_use]
    pub fn commit_token(&self) -> Option<&PageToken> {
        self.next_page_token
            .as_ref()
            .or(self.new_start_token.as_ref())
    }
}
