//! Object key construction
//!
//! Builds the stable S3 key under which a mirrored file is stored:
//!
//! ```text
//! drivesync/My Drive_<folder>_<subfolder>/<fileName>__<fileId>[.<ext>]
//! ```
//!
//! The folder lineage is flattened into a single key segment: the literal
//! root label `My Drive` followed by one `_<name>` marker per folder in
//! root-to-leaf order. The leaf embeds the Drive file id so two files that
//! share a name in the same folder still map to distinct keys (names are
//! not unique in Drive; ids are). The export extension is appended only
//! for exported documents.
//!
//! Keys overwrite in place: re-writing the same file produces the same key,
//! which is what makes interrupted runs safe to repeat.

use serde::{Deserialize, Serialize};

/// Literal root label anchoring every key (S3 has no real Drive root)
pub const ROOT_LABEL: &str = "My Drive";

/// Maximum length of a sanitized leaf file name
const MAX_NAME_LEN: usize = 150;

/// Maximum length of a sanitized folder segment
const MAX_SEGMENT_LEN: usize = 100;

// ============================================================================
// Sanitization
// ============================================================================

/// Sanitize a leaf file name for use in an object key
///
/// Keeps alphanumerics, `_`, `.`, `-`, spaces and parentheses; everything
/// else becomes `_`. Whitespace runs collapse to a single space and the
/// result is capped at 150 characters.
#[must_use]
pub fn safe_name(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | ' ' | '(' | ')') {
                c
            } else {
                '_'
            }
        })
        .collect();

    collapse_whitespace(&replaced).chars().take(MAX_NAME_LEN).collect()
}

/// Sanitize one folder segment for use in an object key
///
/// Same character policy as [`safe_name`], plus leading/trailing dots and
/// spaces are trimmed (they confuse S3 console listings), the cap is 100
/// characters, and an empty result becomes `_`.
#[must_use]
pub fn safe_segment(segment: &str) -> String {
    let cleaned = safe_name(segment);
    let trimmed = cleaned.trim_matches(|c| c == ' ' || c == '.');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.chars().take(MAX_SEGMENT_LEN).collect()
    }
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(c);
            in_ws = false;
        }
    }
    out
}

// ============================================================================
// ResolvedPath
// ============================================================================

/// A file's resolved position in the Drive hierarchy
///
/// Derived once per record and cached per file id for the lifetime of one
/// invocation. Deterministic for a fixed ancestor snapshot: it never
/// depends on the processing order of unrelated records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPath {
    /// Folder names in root-to-leaf order (sanitized, root label excluded)
    pub folder_segments: Vec<String>,
    /// Leaf key: `<sanitizedName>__<fileId>`
    pub leaf: String,
}

impl ResolvedPath {
    /// Build a resolved path from raw folder names, file name and id
    ///
    /// Sanitization happens here so callers pass names exactly as the API
    /// returned them.
    #[must_use]
    pub fn new(folder_names: &[String], file_name: &str, file_id: &str) -> Self {
        let folder_segments = folder_names
            .iter()
            .filter(|n| !n.is_empty())
            .map(|n| safe_segment(n))
            .collect();
        let leaf = format!("{}__{}", safe_name(file_name), file_id);
        Self {
            folder_segments,
            leaf,
        }
    }

    /// Compose the final object key under `prefix`
    ///
    /// # Arguments
    /// * `prefix` - bucket-level key prefix (e.g. `drivesync`)
    /// * `extension` - export extension with leading dot, for exported
    ///   documents only
    #[must_use]
    pub fn object_key(&self, prefix: &str, extension: Option<&str>) -> String {
        let mut folder = String::from(ROOT_LABEL);
        for segment in &self.folder_segments {
            folder.push('_');
            folder.push_str(segment);
        }

        let mut key = format!("{prefix}/{folder}/{}", self.leaf);
        if let Some(ext) = extension {
            key.push_str(ext);
        }
        key
    }
}
