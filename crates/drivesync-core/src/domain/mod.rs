//! Domain entities and business logic
//!
//! This module contains the core domain types for drivesync:
//! - Newtypes for type-safe identifiers and the persisted sync cursor
//! - Change-feed record and page DTOs
//! - The export policy classification table
//! - Object key construction and name sanitization
//! - The per-invocation run summary
//! - Domain-specific error types

pub mod change;
pub mod errors;
pub mod export;
pub mod key;
pub mod newtypes;
pub mod summary;

// Re-export commonly used types
pub use change::{ChangePage, ChangeRecord, FileMetadata};
pub use errors::{DomainError, SyncError};
pub use export::{classify, ExportDecision, SkipReason};
pub use key::{safe_name, safe_segment, ResolvedPath, ROOT_LABEL};
pub use newtypes::{FileId, PageToken, SyncCursor, CURSOR_SENTINEL};
pub use summary::{ErrorRecord, RunSummary};
