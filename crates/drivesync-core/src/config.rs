//! Configuration module for drivesync.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, defaults, and a platform-appropriate
//! default path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for drivesync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub checkpoint: CheckpointConfig,
    pub credentials: CredentialsConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Object store (S3) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Target S3 bucket.
    pub bucket: String,
    /// Key prefix under which mirrored objects are written.
    pub prefix: String,
    /// Optional region override.
    pub region: Option<String>,
    /// Optional custom endpoint URL (for LocalStack/MinIO testing).
    pub endpoint_url: Option<String>,
}

/// Checkpoint (SSM parameter) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Name of the string parameter holding the sync cursor.
    pub parameter_name: String,
}

/// Credential (Secrets Manager) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Id of the secret holding the OAuth2 refresh-token material.
    pub secret_id: String,
}

/// Engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Wall-clock budget for one invocation, in seconds. The engine stops
    /// pulling new pages once this is reached; the surrounding execution
    /// environment enforces a hard timeout, and a voluntary early exit
    /// preserves progress where a forced kill would not.
    pub time_budget_secs: u64,
    /// Maximum retries per remote call on transient failure.
    pub max_retries: u32,
    /// Base delay for exponential backoff, in seconds.
    pub retry_base_delay_secs: u64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: "google-drivesync-backup".to_string(),
            prefix: "drivesync".to_string(),
            region: None,
            endpoint_url: None,
        }
    }
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            parameter_name: "/drivesync/startPageToken".to_string(),
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            secret_id: "drivesync/google-oauth".to_string(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            // Leaves ample headroom under a 15 minute environment timeout.
            time_budget_secs: 720,
            max_retries: 5,
            retry_base_delay_secs: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/drivesync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("drivesync")
            .join("config.yaml")
    }

    /// Structural validation of the loaded values.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.storage.bucket.is_empty() {
            anyhow::bail!("storage.bucket must not be empty");
        }
        if self.checkpoint.parameter_name.is_empty() {
            anyhow::bail!("checkpoint.parameter_name must not be empty");
        }
        if self.credentials.secret_id.is_empty() {
            anyhow::bail!("credentials.secret_id must not be empty");
        }
        if self.sync.time_budget_secs == 0 {
            anyhow::bail!("sync.time_budget_secs must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_deployment_names() {
        let config = Config::default();
        assert_eq!(config.storage.bucket, "google-drivesync-backup");
        assert_eq!(config.storage.prefix, "drivesync");
        assert_eq!(config.checkpoint.parameter_name, "/drivesync/startPageToken");
        assert_eq!(config.credentials.secret_id, "drivesync/google-oauth");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_yaml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "storage:\n  bucket: my-bucket\nsync:\n  time_budget_secs: 60\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.storage.bucket, "my-bucket");
        assert_eq!(config.storage.prefix, "drivesync");
        assert_eq!(config.sync.time_budget_secs, 60);
        assert_eq!(config.sync.max_retries, 5);
    }

    #[test]
    fn test_load_rejects_empty_bucket() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage:\n  bucket: ''\n").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/drivesync.yaml"));
        assert_eq!(config.storage.prefix, "drivesync");
    }
}
