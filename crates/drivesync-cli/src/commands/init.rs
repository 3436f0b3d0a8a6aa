//! Init command - establish the change-feed baseline
//!
//! Stores a fresh start token so the next `sync` mirrors changes from this
//! point on. Everything that existed before is never delivered through the
//! change feed, so re-baselining deliberately narrows the mirror's scope;
//! `--force` is required when a cursor already exists.

use anyhow::Result;
use clap::Args;

use drivesync_core::config::Config;
use drivesync_core::domain::newtypes::SyncCursor;
use drivesync_core::domain::summary::RunSummary;

use crate::output::{OutputFormat, Printer};
use crate::setup;

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Replace an existing cursor with a fresh baseline
    #[arg(long)]
    force: bool,
}

impl InitCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let printer = Printer::new(format);

        let checkpoint = setup::build_checkpoint(config).await;
        let cursor = checkpoint.load().await?;
        if !cursor.is_uninitialized() && !self.force {
            anyhow::bail!(
                "cursor already initialized at {} (use --force to re-baseline; \
                 changes between the old and new baselines will never be mirrored)",
                cursor.to_stored()
            );
        }
        if !cursor.is_uninitialized() {
            printer.warn(&format!("discarding cursor {}", cursor.to_stored()));
            checkpoint.save(&SyncCursor::Uninitialized).await?;
        }

        let engine = setup::build_engine(config).await?;
        let summary = engine.run().await?;
        debug_assert!(matches!(summary, RunSummary::Initialized));

        printer.json(&serde_json::to_value(&summary)?);
        printer.success("Baseline established; next run will mirror changes");
        Ok(())
    }
}
