//! drivesync Sync - change-feed sync engine
//!
//! The orchestration layer: pulls pages from the Drive change feed,
//! resolves each record's folder lineage, applies the export policy,
//! writes objects, and advances the persisted cursor one fully-processed
//! page at a time.
//!
//! Everything here talks to the outside world through the core ports, so
//! the whole engine is testable against in-memory fakes.

pub mod engine;
pub mod resolver;
pub mod retry;

pub use engine::SyncEngine;
pub use resolver::PathResolver;
pub use retry::{is_transient_error, with_retry, RetryPolicy};
