//! Incremental sync engine
//!
//! The [`SyncEngine`] drives one invocation end to end:
//!
//! 1. **Load cursor**: read the persisted change-feed position. An
//!    uninitialized cursor turns this run into baseline establishment.
//! 2. **Page loop**: fetch one page of changes, process every record
//!    (skip, download, or export, then write the object), and persist the
//!    page's continuation token before fetching the next page.
//! 3. **Summary**: return counters and non-fatal errors to the caller.
//!
//! The checkpoint is advanced only after a page's records have all been
//! handled, so a crash or stop mid-page re-delivers at most that one page
//! on the next run. Object writes overwrite in place under stable keys,
//! which makes the re-delivery harmless.
//!
//! Removed and trashed records are deliberately ignored: the mirror is an
//! archive and never deletes.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use drivesync_core::config::Config;
use drivesync_core::domain::change::ChangeRecord;
use drivesync_core::domain::errors::SyncError;
use drivesync_core::domain::export::{classify, ExportDecision};
use drivesync_core::domain::key::ResolvedPath;
use drivesync_core::domain::newtypes::{FileId, SyncCursor};
use drivesync_core::domain::summary::{ErrorRecord, RunSummary};
use drivesync_core::ports::{ICheckpointStore, IDriveClient, IObjectStore, ObjectMeta};

use crate::resolver::PathResolver;
use crate::retry::{with_retry, RetryPolicy};

/// Content type recorded when the feed omits one
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Result of processing a single change record
enum RecordOutcome {
    /// An object was written (verbatim copy or export)
    Written,
    /// The record was deliberately not mirrored
    Skipped(String),
}

/// A record-level failure is either survivable or fatal for the run
///
/// Errors naming a missing object (deleted mid-walk, access revoked) only
/// cost that record; anything else that survives the retry ceiling stops
/// the run so the page is re-delivered next time.
fn is_missing_error(err: &anyhow::Error) -> bool {
    let err_str = format!("{err:#}").to_lowercase();
    err_str.contains("404") || err_str.contains("not found")
}

/// Change-feed-driven mirror engine
pub struct SyncEngine {
    drive: Arc<dyn IDriveClient>,
    store: Arc<dyn IObjectStore>,
    checkpoint: Arc<dyn ICheckpointStore>,
    config: Config,
}

impl SyncEngine {
    /// Create an engine over the given port implementations
    pub fn new(
        drive: Arc<dyn IDriveClient>,
        store: Arc<dyn IObjectStore>,
        checkpoint: Arc<dyn ICheckpointStore>,
        config: Config,
    ) -> Self {
        Self {
            drive,
            store,
            checkpoint,
            config,
        }
    }

    fn policy(&self) -> RetryPolicy {
        RetryPolicy::from_config(&self.config.sync)
    }

    /// Run one sync invocation
    ///
    /// Returns `Ok` with a summary for every run that got far enough to
    /// make a classification; only configuration-level failures (cursor
    /// unreadable, baseline unestablishable) surface as `Err`.
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let budget = Duration::from_secs(self.config.sync.time_budget_secs);
        let policy = self.policy();

        let cursor = self
            .checkpoint
            .load()
            .await
            .context("failed to load sync cursor")?;

        let mut token = match cursor {
            SyncCursor::Uninitialized => return self.initialize(policy).await,
            SyncCursor::Token(token) => token,
        };

        info!(cursor = %token, "starting sync run");

        let resolver = PathResolver::new(Arc::clone(&self.drive), policy);
        let mut seen: HashSet<String> = HashSet::new();
        let mut files_written: u64 = 0;
        let mut files_skipped: u64 = 0;
        let mut errors: Vec<ErrorRecord> = Vec::new();

        'pages: loop {
            if started.elapsed() >= budget {
                warn!(
                    elapsed_secs = started.elapsed().as_secs(),
                    "time budget reached, stopping between pages"
                );
                break;
            }

            let drive = Arc::clone(&self.drive);
            let cursor_token = token.clone();
            let page = match with_retry(policy, "list_changes", || {
                let drive = Arc::clone(&drive);
                let cursor_token = cursor_token.clone();
                async move { drive.list_changes(&cursor_token).await }
            })
            .await
            {
                Ok(page) => page,
                Err(err) => {
                    error!(error = ?err, "failed to fetch changes page, stopping run");
                    errors.push(ErrorRecord::run_level(format!("{err:#}")));
                    break;
                }
            };

            debug!(records = page.records.len(), "processing changes page");

            for record in &page.records {
                match self.process_record(record, &resolver, &mut seen).await {
                    Ok(RecordOutcome::Written) => files_written += 1,
                    Ok(RecordOutcome::Skipped(reason)) => {
                        debug!(file_id = %record.file_id, reason = %reason, "record skipped");
                        files_skipped += 1;
                    }
                    Err(err) if is_missing_error(&err) => {
                        let skip = SyncError::RecordSkip {
                            file_id: record.file_id.clone(),
                            reason: format!("{err:#}"),
                        };
                        warn!(error = %skip, "record skipped");
                        errors.push(ErrorRecord::for_file(&record.file_id, format!("{err:#}")));
                        files_skipped += 1;
                    }
                    Err(err) => {
                        // The page's checkpoint is not advanced, so these
                        // records are re-delivered next run.
                        error!(file_id = %record.file_id, error = ?err, "record failed, stopping run");
                        errors.push(ErrorRecord::for_file(&record.file_id, format!("{err:#}")));
                        break 'pages;
                    }
                }
            }

            let Some(commit) = page.commit_token() else {
                errors.push(ErrorRecord::run_level(
                    "changes page carried no continuation token".to_string(),
                ));
                break;
            };

            let next_cursor = SyncCursor::Token(commit.clone());
            if let Err(err) = self.checkpoint.save(&next_cursor).await {
                let failure = SyncError::CheckpointWriteFailure(format!("{err:#}"));
                error!(error = %failure, "stopping run");
                errors.push(ErrorRecord::run_level(failure.to_string()));
                break;
            }

            if !page.has_more() {
                break;
            }
            token = commit.clone();
        }

        info!(
            files_written,
            files_skipped,
            errors = errors.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "sync run finished"
        );

        Ok(RunSummary::Synced {
            files_written,
            files_skipped,
            errors,
        })
    }

    /// First run: establish the change-feed baseline and stop
    ///
    /// Everything that existed before this point is out of scope; the
    /// mirror covers changes from here on.
    async fn initialize(&self, policy: RetryPolicy) -> Result<RunSummary> {
        let drive = Arc::clone(&self.drive);
        let token = with_retry(policy, "start_page_token", || {
            let drive = Arc::clone(&drive);
            async move { drive.start_page_token().await }
        })
        .await
        .context("failed to acquire baseline token")?;

        self.checkpoint
            .save(&SyncCursor::Token(token.clone()))
            .await
            .context("failed to store baseline cursor")?;

        info!(baseline = %token, "sync cursor initialized");
        Ok(RunSummary::Initialized)
    }

    /// Process one change record into at most one object write
    async fn process_record(
        &self,
        record: &ChangeRecord,
        resolver: &PathResolver,
        seen: &mut HashSet<String>,
    ) -> Result<RecordOutcome> {
        if record.removed {
            return Ok(RecordOutcome::Skipped("removed".to_string()));
        }
        if record.trashed {
            return Ok(RecordOutcome::Skipped("trashed".to_string()));
        }
        // The feed occasionally delivers records with no file at all
        // (e.g. drive-level changes). Nothing to mirror.
        if record.file_id.is_empty() {
            return Ok(RecordOutcome::Skipped("no file id".to_string()));
        }

        // Shortcuts mirror their target's content under the shortcut's own
        // name and location.
        let (content_id, mime, modified) = match &record.shortcut_target {
            Some(target_id) => {
                let target = resolver.metadata(target_id).await?;
                if target.trashed {
                    return Ok(RecordOutcome::Skipped("shortcut target trashed".to_string()));
                }
                (target.id.clone(), target.mime_type.clone(), target.modified.or(record.modified))
            }
            None => (record.file_id.clone(), record.mime_type.clone(), record.modified),
        };

        // Content already fetched this run only needs one upload; the feed
        // is replayed from a snapshot, so any occurrence yields the same
        // bytes. Shortcuts count under their target's id.
        if !seen.insert(content_id.clone()) {
            return Ok(RecordOutcome::Skipped("duplicate within run".to_string()));
        }

        let (export_mime, extension) = match classify(&mime) {
            ExportDecision::Skip(reason) => {
                return Ok(RecordOutcome::Skipped(reason.to_string()));
            }
            ExportDecision::Verbatim => (None, None),
            ExportDecision::ExportAs { mime, extension } => (Some(mime), Some(extension)),
        };

        let folders = resolver.resolve_parents(&record.parents).await?;
        let path = ResolvedPath::new(&folders, &record.name, &content_id);
        let key = path.object_key(&self.config.storage.prefix, extension);

        let file_id = FileId::new(content_id.clone())?;
        let policy = self.policy();
        let drive = Arc::clone(&self.drive);
        let bytes = match export_mime {
            Some(export_mime) => {
                with_retry(policy, "export", || {
                    let drive = Arc::clone(&drive);
                    let file_id = file_id.clone();
                    async move { drive.export(&file_id, export_mime).await }
                })
                .await?
            }
            None => {
                with_retry(policy, "download", || {
                    let drive = Arc::clone(&drive);
                    let file_id = file_id.clone();
                    async move { drive.download(&file_id).await }
                })
                .await?
            }
        };

        let content_type = match export_mime {
            Some(export_mime) => export_mime.to_string(),
            None if mime.is_empty() => FALLBACK_CONTENT_TYPE.to_string(),
            None => mime.clone(),
        };
        let meta = ObjectMeta {
            drive_file_id: content_id.clone(),
            drive_modified_time: modified.map(|t| t.to_rfc3339()),
            drive_source_mime: export_mime.is_some().then(|| mime.clone()),
        };

        let store = Arc::clone(&self.store);
        with_retry(policy, "put_object", || {
            let store = Arc::clone(&store);
            let key = key.clone();
            let bytes = bytes.clone();
            let content_type = content_type.clone();
            let meta = meta.clone();
            async move { store.put(&key, bytes, &content_type, &meta).await }
        })
        .await?;

        info!(file_id = %content_id, key = %key, size = bytes.len(), "object written");
        Ok(RecordOutcome::Written)
    }
}

// ============================================================================
// Tests
// ============================================================================
