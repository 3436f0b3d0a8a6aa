//! Status command - show the stored cursor and target configuration

use anyhow::Result;
use clap::Args;

use drivesync_core::config::Config;
use drivesync_core::domain::newtypes::SyncCursor;

use crate::output::{OutputFormat, Printer};
use crate::setup;

#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let printer = Printer::new(format);

        let checkpoint = setup::build_checkpoint(config).await;
        let cursor = checkpoint.load().await?;

        printer.json(&serde_json::json!({
            "initialized": !cursor.is_uninitialized(),
            "cursor": cursor.to_stored(),
            "bucket": config.storage.bucket,
            "prefix": config.storage.prefix,
            "parameterName": config.checkpoint.parameter_name,
        }));

        match &cursor {
            SyncCursor::Uninitialized => {
                printer.success("Cursor: uninitialized (run 'drivesync sync' to baseline)");
            }
            SyncCursor::Token(token) => {
                printer.success(&format!("Cursor: {token}"));
            }
        }
        printer.line(&format!(
            "Target: s3://{}/{}", config.storage.bucket, config.storage.prefix
        ));
        printer.line(&format!("Parameter: {}", config.checkpoint.parameter_name));
        Ok(())
    }
}
