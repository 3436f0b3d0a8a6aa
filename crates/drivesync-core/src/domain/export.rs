//! Export policy
//!
//! Classifies a file's native MIME type into one of three behaviors:
//! copy the bytes verbatim, export to an Office interchange format, or
//! skip entirely. The classification is a pure lookup; new Google types
//! are handled by extending the table in [`classify`].
//!
//! Google Workspace editor documents (Docs, Sheets, Slides) have no byte
//! representation of their own and must be exported. All other
//! `application/vnd.google-apps.*` types (forms, sites, maps, ...) cannot
//! be downloaded at all and are skipped. Anything else is a regular binary
//! file and is mirrored byte-for-byte.

use std::fmt::{self, Display, Formatter};

/// MIME type of a Drive folder
pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// MIME type of a Drive shortcut
pub const SHORTCUT_MIME: &str = "application/vnd.google-apps.shortcut";

/// Prefix shared by all Google-native (non-downloadable) types
pub const GOOGLE_APPS_PREFIX: &str = "application/vnd.google-apps.";

/// Google Docs native type
pub const DOCUMENT_MIME: &str = "application/vnd.google-apps.document";
/// Google Sheets native type
pub const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
/// Google Slides native type
pub const PRESENTATION_MIME: &str = "application/vnd.google-apps.presentation";

/// DOCX export target for Google Docs
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// XLSX export target for Google Sheets
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// PPTX export target for Google Slides
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

// ============================================================================
// ExportDecision
// ============================================================================

/// Why a record is being skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Folders have no content to mirror
    Folder,
    /// Shortcuts are resolved to their target before classification;
    /// one that reaches the policy unresolved is skipped
    Shortcut,
    /// A Google-native type with no export mapping (forms, sites, maps, ...)
    NotExportable,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Folder => write!(f, "folder"),
            SkipReason::Shortcut => write!(f, "unresolved shortcut"),
            SkipReason::NotExportable => write!(f, "non-exportable Google type"),
        }
    }
}

/// Per-record behavior decided from the native MIME type alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDecision {
    /// Download the bytes as-is and mirror them
    Verbatim,
    /// Export to the given interchange format before mirroring
    ExportAs {
        /// MIME type to request from the export endpoint
        mime: &'static str,
        /// File extension appended to the object key (with leading dot)
        extension: &'static str,
    },
    /// Do not mirror this record
    Skip(SkipReason),
}

/// Classify a native MIME type into an [`ExportDecision`]
///
/// Pure function: the result depends only on the MIME type, never on
/// processing order or prior records.
#[must_use]
pub fn classify(mime_type: &str) -> ExportDecision {
    match mime_type {
        DOCUMENT_MIME => ExportDecision::ExportAs {
            mime: DOCX_MIME,
            extension: ".docx",
        },
        SPREADSHEET_MIME => ExportDecision::ExportAs {
            mime: XLSX_MIME,
            extension: ".xlsx",
        },
        PRESENTATION_MIME => ExportDecision::ExportAs {
            mime: PPTX_MIME,
            extension: ".pptx",
        },
        FOLDER_MIME => ExportDecision::Skip(SkipReason::Folder),
        SHORTCUT_MIME => ExportDecision::Skip(SkipReason::Shortcut),
        other if other.starts_with(GOOGLE_APPS_PREFIX) => {
            ExportDecision::Skip(SkipReason::NotExportable)
        }
        _ => ExportDecision::Verbatim,
    }
}
