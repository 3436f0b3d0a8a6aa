//! Run summary
//!
//! The structured result of one engine invocation, returned to the caller
//! and never persisted. Serializes to the wire shape consumed by whatever
//! triggered the run:
//!
//! ```json
//! {"status": "initialized"}
//! {"status": "synced", "filesWritten": 3, "filesSkipped": 1}
//! ```

use serde::{Deserialize, Serialize};

/// A non-fatal error recorded against a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Drive file id the error relates to, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    /// Human-readable description
    pub message: String,
}

impl ErrorRecord {
    /// Error tied to a specific record
    pub fn for_file(file_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_id: Some(file_id.into()),
            message: message.into(),
        }
    }

    /// Error not tied to any record (page fetch, checkpoint write, ...)
    pub fn run_level(message: impl Into<String>) -> Self {
        Self {
            file_id: None,
            message: message.into(),
        }
    }
}

/// Summary of one invocation
///
/// `Initialized` is returned by the very first run, which only establishes
/// the change-feed baseline and processes nothing. Every later run returns
/// `Synced` with its counters, including runs cut short by the time budget
/// or a checkpoint failure (the counters then cover what was committed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunSummary {
    /// First run: baseline cursor saved, no records processed
    Initialized,
    /// Normal run: counters for this invocation
    #[serde(rename_all = "camelCase")]
    Synced {
        /// Objects written (verbatim copies and exports)
        files_written: u64,
        /// Records deliberately not mirrored (removed, trashed, folders,
        /// non-exportable types, duplicates within the run)
        files_skipped: u64,
        /// Non-fatal errors, in the order they occurred
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        errors: Vec<ErrorRecord>,
    },
}

impl RunSummary {
    /// Number of objects written, zero for an initialization run
    #[must_use]
    pub fn files_written(&self) -> u64 {
        match self {
            RunSummary::Initialized => 0,
            RunSummary::Synced { files_written, .. } => *files_written,
        }
    }

    /// Number of records skipped, zero for an initialization run
    #[must_use]
    pub fn files_skipped(&self) -> u64 {
        match self {
            RunSummary::Initialized => 0,
            RunSummary::Synced { files_skipped, .. } => *files_skipped,
        }
    }

    /// Errors recorded during the run
    #[must_use]
    pub fn errors(&self) -> &[ErrorRecord] {
        match self {
            RunSummary::Initialized => &[],
            RunSummary::Synced { errors, .. } => errors,
        }
    }
}
