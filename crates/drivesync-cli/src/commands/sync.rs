//! Sync command - run one mirror invocation

use anyhow::Result;
use clap::Args;

use drivesync_core::config::Config;
use drivesync_core::domain::summary::RunSummary;

use crate::output::{OutputFormat, Printer};
use crate::setup;

/// Run the engine once against the stored cursor
#[derive(Debug, Args)]
pub struct SyncCommand {}

impl SyncCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let printer = Printer::new(format);

        let engine = setup::build_engine(config).await?;
        let summary = engine.run().await?;

        printer.json(&serde_json::to_value(&summary)?);
        match &summary {
            RunSummary::Initialized => {
                printer.success("Baseline established; next run will mirror changes");
            }
            RunSummary::Synced {
                files_written,
                files_skipped,
                errors,
            } => {
                printer.success(&format!(
                    "Sync complete: {files_written} written, {files_skipped} skipped"
                ));
                for error in errors {
                    match &error.file_id {
                        Some(file_id) => printer.warn(&format!("{file_id}: {}", error.message)),
                        None => printer.warn(&error.message),
                    }
                }
            }
        }
        Ok(())
    }
}
