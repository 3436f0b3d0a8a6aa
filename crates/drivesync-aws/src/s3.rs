//! S3 adapter for the object store port.

use anyhow::Context;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use drivesync_core::ports::{IObjectStore, ObjectMeta};

/// S3-backed implementation of [`IObjectStore`].
///
/// Plain unconditional `PutObject` per write. Bucket versioning, lifecycle
/// rules, and encryption are bucket-level configuration and not this
/// adapter's concern.
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new store targeting `bucket`.
    pub fn new(config: &aws_config::SdkConfig, bucket: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            bucket: bucket.into(),
        }
    }
}

#[async_trait::async_trait]
impl IObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        meta: &ObjectMeta,
    ) -> anyhow::Result<()> {
        let size = bytes.len();

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .metadata("drive-file-id", &meta.drive_file_id);

        if let Some(modified) = &meta.drive_modified_time {
            request = request.metadata("drive-modified-time", modified);
        }
        if let Some(source_mime) = &meta.drive_source_mime {
            request = request.metadata("drive-source-mime", source_mime);
        }

        request
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("{:?}", err))
            .with_context(|| format!("failed to put s3://{}/{}", self.bucket, key))?;

        tracing::debug!(bucket = %self.bucket, key = %key, size, "wrote object");
        Ok(())
    }
}
