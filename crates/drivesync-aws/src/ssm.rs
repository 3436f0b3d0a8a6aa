//! SSM adapter for the checkpoint store port.
//!
//! The sync cursor lives in a single SSM string parameter. A value of
//! `"INIT"` (or a missing parameter) means no baseline has been established
//! yet; any other value is the opaque page token to resume from.

use anyhow::Context;
use aws_sdk_ssm::types::ParameterType;
use aws_sdk_ssm::Client;
use drivesync_core::domain::SyncCursor;
use drivesync_core::ports::ICheckpointStore;

/// SSM-parameter-backed implementation of [`ICheckpointStore`].
pub struct SsmCheckpointStore {
    client: Client,
    parameter_name: String,
}

impl SsmCheckpointStore {
    /// Create a new store reading and writing `parameter_name`.
    pub fn new(config: &aws_config::SdkConfig, parameter_name: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            parameter_name: parameter_name.into(),
        }
    }
}

#[async_trait::async_trait]
impl ICheckpointStore for SsmCheckpointStore {
    async fn load(&self) -> anyhow::Result<SyncCursor> {
        let response = self
            .client
            .get_parameter()
            .name(&self.parameter_name)
            .send()
            .await;

        let output = match response {
            Ok(output) => output,
            // Absent parameter behaves like the uninitialized sentinel, so a
            // fresh deployment needs no pre-seeded value.
            Err(err) if err.as_service_error().map(|e| e.is_parameter_not_found()) == Some(true) => {
                tracing::info!(parameter = %self.parameter_name, "checkpoint parameter not found");
                return Ok(SyncCursor::Uninitialized);
            }
            Err(err) => {
                return Err(anyhow::anyhow!("{:?}", err)).with_context(|| {
                    format!("failed to read checkpoint parameter {}", self.parameter_name)
                });
            }
        };

        let value = output
            .parameter()
            .and_then(|p| p.value())
            .unwrap_or_default();

        Ok(SyncCursor::from_stored(value))
    }

    async fn save(&self, cursor: &SyncCursor) -> anyhow::Result<()> {
        let value = cursor.to_stored();

        self.client
            .put_parameter()
            .name(&self.parameter_name)
            .value(value)
            .r#type(ParameterType::String)
            .overwrite(true)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("{:?}", err))
            .with_context(|| {
                format!("failed to write checkpoint parameter {}", self.parameter_name)
            })?;

        tracing::debug!(parameter = %self.parameter_name, cursor = %value, "checkpoint saved");
        Ok(())
    }
}
