//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including validation failures and the engine-level error taxonomy.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid Drive file identifier
    #[error("Invalid file id: {0}")]
    InvalidFileId(String),

    /// Invalid change-feed page token
    #[error("Invalid page token: {0}")]
    InvalidPageToken(String),

    /// Invalid object key format or content
    #[error("Invalid object key: {0}")]
    InvalidObjectKey(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Engine-level error taxonomy
///
/// Classifies failures observed during a sync run so the engine can decide
/// whether to retry, skip the record, or stop the run:
///
/// - `Transient` errors are retried with bounded exponential backoff.
/// - `RecordSkip` errors are logged into the run summary and processing
///   continues with the next record.
/// - `CheckpointWriteFailure` stops the run; the cursor stays at the last
///   fully committed page.
/// - `Configuration` errors fail the whole invocation immediately.
///
/// No error class ever triggers deletion or rollback of already-written
/// objects; overwrite idempotency makes re-attempting forward safe.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network timeout, rate limit, expired access token, 5xx
    #[error("Transient failure: {0}")]
    Transient(String),

    /// Unsupported native type, unresolvable path (cycle or missing ancestor)
    #[error("Record skipped ({file_id}): {reason}")]
    RecordSkip {
        /// The Drive file id of the record being skipped
        file_id: String,
        /// Why the record could not be processed
        reason: String,
    },

    /// The checkpoint store rejected the cursor write
    #[error("Checkpoint write failed: {0}")]
    CheckpointWriteFailure(String),

    /// Missing/invalid credential, missing checkpoint parameter
    #[error("Configuration failure: {0}")]
    Configuration(String),
}
