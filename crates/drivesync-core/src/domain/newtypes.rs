//! Validated newtype wrappers for domain identifiers
//!
//! Newtypes prevent accidental mixing of the various opaque strings the
//! engine moves around (Drive file ids, change-feed page tokens) and give
//! the stored cursor an explicit uninitialized state.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Sentinel value stored in the checkpoint parameter before the first run
pub const CURSOR_SENTINEL: &str = "INIT";

// ============================================================================
// FileId
// ============================================================================

/// A Google Drive file or folder identifier
///
/// Drive ids are opaque, globally unique, non-empty strings. We do minimal
/// validation since their internal structure is not documented.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileId(String);

impl FileId {
    /// Create a new FileId
    ///
    /// # Errors
    /// Returns error if the id is empty
    pub fn new(id: String) -> Result<Self, DomainError> {
        if id.is_empty() {
            return Err(DomainError::InvalidFileId(
                "File id cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for FileId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<FileId> for String {
    fn from(id: FileId) -> Self {
        id.0
    }
}

// ============================================================================
// PageToken
// ============================================================================

/// An opaque change-feed page token issued by the Drive API
///
/// Page tokens mark a position in the change feed. They are passed back to
/// the API verbatim and never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageToken(String);

impl PageToken {
    /// Create a new PageToken
    ///
    /// # Errors
    /// Returns error if the token is empty or equals the reserved
    /// uninitialized sentinel
    pub fn new(token: String) -> Result<Self, DomainError> {
        if token.is_empty() {
            return Err(DomainError::InvalidPageToken(
                "Page token cannot be empty".to_string(),
            ));
        }
        if token == CURSOR_SENTINEL {
            return Err(DomainError::InvalidPageToken(format!(
                "'{CURSOR_SENTINEL}' is reserved for the uninitialized cursor"
            )));
        }
        Ok(Self(token))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PageToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for PageToken {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PageToken> for String {
    fn from(token: PageToken) -> Self {
        token.0
    }
}

// ============================================================================
// SyncCursor
// ============================================================================

/// The persisted sync cursor
///
/// Two states are possible: `Uninitialized` (no baseline has been
/// established yet; stored as the `"INIT"` sentinel or an absent parameter)
/// and a concrete opaque token issued by the Drive API.
///
/// The cursor is owned by the checkpoint store; the engine treats the token
/// as opaque and only ever replaces it wholesale after a fully committed
/// page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCursor {
    /// No baseline established; the next run must initialize
    Uninitialized,
    /// All changes up to this token have been processed
    Token(PageToken),
}

impl SyncCursor {
    /// Parse a stored parameter value into a cursor
    ///
    /// Empty strings and the `"INIT"` sentinel map to `Uninitialized`;
    /// anything else is taken verbatim as an opaque token.
    pub fn from_stored(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == CURSOR_SENTINEL {
            SyncCursor::Uninitialized
        } else {
            // Stored tokens came from the API, so this cannot fail for
            // non-empty, non-sentinel input.
            SyncCursor::Token(PageToken(trimmed.to_string()))
        }
    }

    /// The string form written back to the checkpoint parameter
    #[must_use]
    pub fn to_stored(&self) -> &str {
        match self {
            SyncCursor::Uninitialized => CURSOR_SENTINEL,
            SyncCursor::Token(t) => t.as_str(),
        }
    }

    /// Returns true if no baseline has been established
    #[must_use]
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, SyncCursor::Uninitialized)
    }
}

impl From<PageToken> for SyncCursor {
    fn from(token: PageToken) -> Self {
        SyncCursor::Token(token)
    }
}
