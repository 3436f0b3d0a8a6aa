//! drivesync AWS - AWS adapters
//!
//! Secondary adapters binding the core ports to AWS services:
//!
//! - [`s3`] - object store writes (aws-sdk-s3)
//! - [`ssm`] - sync cursor persistence in an SSM string parameter
//! - [`secrets`] - OAuth2 credential material from Secrets Manager
//!
//! All three share one `SdkConfig` loaded through the standard credential
//! chain, with optional region and endpoint overrides for LocalStack/MinIO
//! style testing.

pub mod s3;
pub mod secrets;
pub mod ssm;

pub use s3::S3ObjectStore;
pub use secrets::SecretsManagerCredentials;
pub use ssm::SsmCheckpointStore;

/// Load the shared AWS SDK configuration.
///
/// Uses the standard AWS credential chain (env vars, ~/.aws, IAM roles,
/// etc.), with optional region and endpoint URL overrides.
pub async fn load_sdk_config(
    region: Option<&str>,
    endpoint_url: Option<&str>,
) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = region {
        loader = loader.region(aws_config::Region::new(region.to_string()));
    }

    if let Some(endpoint_url) = endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }

    loader.load().await
}
