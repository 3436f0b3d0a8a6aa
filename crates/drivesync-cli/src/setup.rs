//! Adapter wiring shared by the online commands
//!
//! Builds the port implementations from configuration: AWS adapters from
//! the shared SDK config, then the Drive client from an access token minted
//! out of the Secrets Manager material.

use std::sync::Arc;

use anyhow::{Context, Result};

use drivesync_aws::{load_sdk_config, S3ObjectStore, SecretsManagerCredentials, SsmCheckpointStore};
use drivesync_core::config::Config;
use drivesync_core::ports::{ICheckpointStore, ICredentialSource, IDriveClient, IObjectStore};
use drivesync_drive::auth::RefreshGrant;
use drivesync_drive::client::DriveClient;
use drivesync_drive::provider::DriveApiProvider;
use drivesync_sync::SyncEngine;

/// Build the SSM checkpoint store on its own (for `status`)
pub async fn build_checkpoint(config: &Config) -> Arc<dyn ICheckpointStore> {
    let sdk = load_sdk_config(
        config.storage.region.as_deref(),
        config.storage.endpoint_url.as_deref(),
    )
    .await;
    Arc::new(SsmCheckpointStore::new(
        &sdk,
        config.checkpoint.parameter_name.as_str(),
    ))
}

/// Build the full engine: AWS adapters plus an authenticated Drive client
pub async fn build_engine(config: &Config) -> Result<SyncEngine> {
    config.validate()?;

    let sdk = load_sdk_config(
        config.storage.region.as_deref(),
        config.storage.endpoint_url.as_deref(),
    )
    .await;

    let store: Arc<dyn IObjectStore> =
        Arc::new(S3ObjectStore::new(&sdk, config.storage.bucket.as_str()));
    let checkpoint: Arc<dyn ICheckpointStore> = Arc::new(SsmCheckpointStore::new(
        &sdk,
        config.checkpoint.parameter_name.as_str(),
    ));

    let credentials = SecretsManagerCredentials::new(&sdk, config.credentials.secret_id.as_str())
        .load()
        .await
        .context("failed to load Drive credentials")?;
    let access = RefreshGrant::new(&credentials)?
        .mint()
        .await
        .context("failed to mint Drive access token")?;
    let drive: Arc<dyn IDriveClient> =
        Arc::new(DriveApiProvider::new(DriveClient::new(access.token)));

    Ok(SyncEngine::new(drive, store, checkpoint, config.clone()))
}
