//! Object store port (driven/secondary port)
//!
//! Interface for the flat key/value store the Drive is mirrored into.
//! The primary implementation targets Amazon S3.
//!
//! The trait deliberately has no delete operation: removed or trashed
//! remote files are never propagated, and keeping deletion off the port
//! makes that invariant structural rather than behavioral.

/// Descriptive metadata attached to each stored object
///
/// Stored alongside the bytes so a mirrored object can always be traced
/// back to its Drive source without consulting the key format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Drive file id the object was mirrored from
    pub drive_file_id: String,
    /// Drive `modifiedTime` of the source at write time (RFC 3339)
    pub drive_modified_time: Option<String>,
    /// Native Google MIME type, recorded for exported documents only
    pub drive_source_mime: Option<String>,
}

/// Port trait for object writes
///
/// `put` has unconditional overwrite semantics: no conditional-put, no
/// versioning decision in the engine (that is store-level configuration).
/// Calling it twice with identical arguments must yield the same stored
/// state, which is what makes re-processing an interrupted page safe.
#[async_trait::async_trait]
pub trait IObjectStore: Send + Sync {
    /// Writes `bytes` under `key`, overwriting any existing object
    ///
    /// # Arguments
    /// * `key` - Full object key including prefix
    /// * `bytes` - Resolved file content (downloaded or exported)
    /// * `content_type` - MIME type stored with the object
    /// * `meta` - Drive provenance metadata
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        meta: &ObjectMeta,
    ) -> anyhow::Result<()>;
}
