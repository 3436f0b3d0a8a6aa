//! Ancestor-graph path resolution
//!
//! Walks a record's parent chain up to the Drive root to recover the folder
//! names its object key is built from. The walk treats the parent graph as
//! untrusted input: chains can be cut short by permission changes and can
//! even contain cycles (observed when folders are moved concurrently with a
//! sync pass).
//!
//! - The first (primary) parent is followed; secondary parents are ignored.
//! - A revisited folder id means a cycle: the walk stops there and the path
//!   is truncated rather than failing the record.
//! - A folder that cannot be fetched (deleted or access revoked mid-walk)
//!   surfaces as an error; the engine skips that record.
//!
//! Metadata lookups and resolved chains are cached for the lifetime of one
//! invocation, so a directory full of files costs one walk, not one per
//! file. Folder renames between invocations are therefore only picked up by
//! records processed after the rename's own change record.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::warn;

use drivesync_core::domain::change::FileMetadata;
use drivesync_core::domain::export::FOLDER_MIME;
use drivesync_core::domain::newtypes::FileId;
use drivesync_core::ports::IDriveClient;

use crate::retry::{with_retry, RetryPolicy};

/// Per-invocation path resolver with memoized metadata and chains
pub struct PathResolver {
    drive: Arc<dyn IDriveClient>,
    policy: RetryPolicy,
    metadata_cache: Mutex<HashMap<String, FileMetadata>>,
    chain_cache: Mutex<HashMap<String, Vec<String>>>,
}

impl PathResolver {
    /// Create a resolver over the given Drive client
    pub fn new(drive: Arc<dyn IDriveClient>, policy: RetryPolicy) -> Self {
        Self {
            drive,
            policy,
            metadata_cache: Mutex::new(HashMap::new()),
            chain_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch (or recall) metadata for a file or folder by id
    ///
    /// Shared with the engine for shortcut target resolution, so a shortcut
    /// and its target's ancestors hit the same cache.
    pub async fn metadata(&self, id: &str) -> Result<FileMetadata> {
        let cached = {
            let cache = self.metadata_cache.lock().unwrap_or_else(|e| e.into_inner());
            cache.get(id).cloned()
        };
        if let Some(meta) = cached {
            return Ok(meta);
        }

        let file_id = FileId::new(id.to_string())?;
        let drive = Arc::clone(&self.drive);
        let meta = with_retry(self.policy, "get_metadata", || {
            let drive = Arc::clone(&drive);
            let file_id = file_id.clone();
            async move { drive.get_metadata(&file_id).await }
        })
        .await?;

        let mut cache = self.metadata_cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(id.to_string(), meta.clone());
        Ok(meta)
    }

    /// Resolve a record's folder lineage from its parent list
    ///
    /// Returns folder names in root-to-leaf order, root label excluded.
    /// An empty parent list means the file sits directly in the root.
    pub async fn resolve_parents(&self, parents: &[String]) -> Result<Vec<String>> {
        match parents.first() {
            Some(parent_id) => self.folder_chain(parent_id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Walk the ancestor chain of `folder_id` up to the root
    async fn folder_chain(&self, folder_id: &str) -> Result<Vec<String>> {
        {
            let cache = self.chain_cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(chain) = cache.get(folder_id) {
                return Ok(chain.clone());
            }
        }

        // Names collected leaf-to-root; reversed at the end. If the walk
        // reaches an ancestor whose chain is already known, that chain
        // becomes the root-side prefix.
        let mut collected: Vec<String> = Vec::new();
        let mut prefix: Vec<String> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = Some(folder_id.to_string());

        while let Some(id) = current {
            let known = {
                let cache = self.chain_cache.lock().unwrap_or_else(|e| e.into_inner());
                cache.get(&id).cloned()
            };
            if let Some(chain) = known {
                prefix = chain;
                break;
            }

            if !visited.insert(id.clone()) {
                warn!(folder_id = %id, "cycle in ancestor graph, truncating path");
                break;
            }

            let meta = self.metadata(&id).await?;

            // Non-folder parents (shortcuts, shared-drive oddities) end the
            // walk without contributing a segment.
            if meta.mime_type != FOLDER_MIME {
                break;
            }
            // The root folder has no parents and is represented by the key's
            // fixed root label, not by name.
            if meta.parents.is_empty() {
                break;
            }

            collected.push(meta.name.clone());
            current = meta.parents.first().cloned();
        }

        collected.reverse();
        let mut chain = prefix;
        chain.append(&mut collected);

        let mut cache = self.chain_cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(folder_id.to_string(), chain.clone());
        Ok(chain)
    }
}
