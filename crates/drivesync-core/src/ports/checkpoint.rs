//! Checkpoint store port (driven/secondary port)
//!
//! Interface to the external key/value store holding the sync cursor.
//! The primary implementation targets an SSM string parameter.
//!
//! The cursor is the only state that outlives an invocation. It is read
//! once at the start of a run and advanced only after the corresponding
//! page of records has been durably written, so an interruption costs at
//! most one page of (idempotent) rework.

use crate::domain::newtypes::SyncCursor;

/// Port trait for cursor persistence
#[async_trait::async_trait]
pub trait ICheckpointStore: Send + Sync {
    /// Loads the stored cursor
    ///
    /// A missing parameter or the `"INIT"` sentinel maps to
    /// [`SyncCursor::Uninitialized`].
    async fn load(&self) -> anyhow::Result<SyncCursor>;

    /// Persists the cursor
    ///
    /// A failure here is fatal for the current page's progress: the engine
    /// must not advance past a page whose checkpoint write failed, even if
    /// the page's records were written successfully, or the resumption
    /// point would silently be lost.
    async fn save(&self, cursor: &SyncCursor) -> anyhow::Result<()>;
}
