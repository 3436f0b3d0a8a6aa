//! Terminal output for the CLI commands
//!
//! Every command produces either human-oriented lines or a single JSON
//! value, selected by the global `--json` flag. Diagnostics always go to
//! stderr so JSON output stays machine-parseable.

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Formats command results according to the selected output mode
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Final success line (human mode only; JSON commands emit a value)
    pub fn success(&self, message: &str) {
        if self.format == OutputFormat::Human {
            println!("\u{2713} {message}");
        }
    }

    /// Supporting detail line (human mode only)
    pub fn line(&self, message: &str) {
        if self.format == OutputFormat::Human {
            println!("  {message}");
        }
    }

    /// Non-fatal problem, always on stderr
    pub fn warn(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("\u{26a0} Warning: {message}"),
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({"level": "warning", "message": message}));
            }
        }
    }

    /// The command's JSON value (JSON mode only)
    pub fn json(&self, value: &serde_json::Value) {
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
        }
    }
}
