//! Inspect command - classify captured change records offline
//!
//! Reads a saved `GET /changes` response (or a bare array of change
//! entries) and reports, per record, what a sync run would do with it.
//! No network or AWS calls are made, so folder lineages are not resolved;
//! the reported key shows the leaf only.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use drivesync_core::config::Config;
use drivesync_core::domain::change::ChangeRecord;
use drivesync_core::domain::export::{classify, ExportDecision};
use drivesync_core::domain::key::ResolvedPath;
use drivesync_drive::changes::parse_change_dump;

use crate::output::{OutputFormat, Printer};

#[derive(Debug, Args)]
pub struct InspectCommand {
    /// Path to a captured changes response (JSON)
    pub file: PathBuf,
}

/// What a sync run would do with one record
fn describe(record: &ChangeRecord) -> (String, Option<String>) {
    if record.removed {
        return ("skip (removed)".to_string(), None);
    }
    if record.trashed {
        return ("skip (trashed)".to_string(), None);
    }
    if record.shortcut_target.is_some() {
        return ("mirror shortcut target".to_string(), None);
    }
    match classify(&record.mime_type) {
        ExportDecision::Skip(reason) => (format!("skip ({reason})"), None),
        ExportDecision::Verbatim => {
            let leaf = ResolvedPath::new(&[], &record.name, &record.file_id).leaf;
            ("copy verbatim".to_string(), Some(leaf))
        }
        ExportDecision::ExportAs { extension, .. } => {
            let leaf = ResolvedPath::new(&[], &record.name, &record.file_id).leaf;
            (format!("export ({extension})"), Some(format!("{leaf}{extension}")))
        }
    }
}

impl InspectCommand {
    pub async fn execute(&self, _config: &Config, format: OutputFormat) -> Result<()> {
        let printer = Printer::new(format);

        let json = std::fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let records = parse_change_dump(&json)?;

        let mut report = Vec::with_capacity(records.len());
        for record in &records {
            let (action, leaf) = describe(record);
            printer.line(&format!(
                "{:<44} {:<24} {}",
                record.file_id,
                action,
                leaf.as_deref().unwrap_or("-")
            ));
            report.push(serde_json::json!({
                "fileId": record.file_id,
                "name": record.name,
                "action": action,
                "leaf": leaf,
            }));
        }
        printer.json(&serde_json::Value::Array(report));
        printer.success(&format!("{} record(s) inspected", records.len()));
        Ok(())
    }
}
