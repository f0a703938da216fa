//! Amazon S3 blob backend.
//!
//! Each container is a bucket and each key is an object:
//! ```text
//! s3://{container}/{key}
//! ```

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, Delete, ObjectIdentifier,
};
use aws_sdk_s3::Client;
use tracing::{debug, info};

use super::{BackendError, BackendKind, BlobBackend, Result};

/// The one region that rejects an explicit `LocationConstraint`.
const DEFAULT_REGION: &str = "us-east-1";

/// S3-based blob backend.
pub struct S3Backend {
    client: Client,
    region: Option<String>,
}

impl S3Backend {
    /// Create a new S3 backend.
    ///
    /// Uses default credentials from the environment (AWS_ACCESS_KEY_ID,
    /// AWS_SECRET_ACCESS_KEY, or IAM role).
    pub async fn new(region: Option<&str>) -> Self {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = region {
            config_loader = config_loader.region(aws_config::Region::new(region.to_string()));
        }

        let config = config_loader.load().await;
        let region = config.region().map(|r| r.as_ref().to_string());

        Self {
            client: Client::new(&config),
            region,
        }
    }

    /// Create with custom endpoint (for S3-compatible services like MinIO).
    pub async fn with_endpoint(endpoint: &str, region: Option<&str>) -> Self {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = region {
            config_loader = config_loader.region(aws_config::Region::new(region.to_string()));
        }

        let config = config_loader.load().await;
        let region = config.region().map(|r| r.as_ref().to_string());

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .endpoint_url(endpoint)
            .force_path_style(true) // Required for MinIO and most S3-compatible services
            .build();

        Self {
            client: Client::from_conf(s3_config),
            region,
        }
    }

    /// Create with explicit client (for testing).
    pub fn with_client(client: Client, region: Option<String>) -> Self {
        Self { client, region }
    }

    /// Bucket configuration for `create_bucket`, if the region needs one.
    fn bucket_configuration(&self) -> Option<CreateBucketConfiguration> {
        match self.region.as_deref() {
            None | Some(DEFAULT_REGION) => None,
            Some(region) => Some(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            ),
        }
    }
}

#[async_trait]
impl BlobBackend for S3Backend {
    async fn get(&self, container: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(container)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let no_such_key = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if no_such_key {
                    BackendError::NotFound {
                        container: container.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    BackendError::Request(format!("S3 get_object failed: {}", e))
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| BackendError::Request(format!("S3 body read failed: {}", e)))?
            .into_bytes()
            .to_vec();

        debug!(bucket = %container, key, size = bytes.len(), "Fetched object from S3");
        Ok(bytes)
    }

    async fn put(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(container)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| BackendError::Request(format!("S3 put_object failed: {}", e)))?;

        debug!(bucket = %container, key, size, "Stored object in S3");
        Ok(())
    }

    async fn container_exists(&self, container: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(container).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_not_found())
                    .unwrap_or(false);
                // Some S3-compatible services answer HEAD with a bare 404
                let status_404 = e
                    .raw_response()
                    .map(|r| r.status().as_u16() == 404)
                    .unwrap_or(false);
                if not_found || status_404 {
                    Ok(false)
                } else {
                    Err(BackendError::Request(format!("S3 head_bucket failed: {}", e)))
                }
            }
        }
    }

    async fn create_container(&self, container: &str) -> Result<()> {
        let mut request = self.client.create_bucket().bucket(container);
        if let Some(configuration) = self.bucket_configuration() {
            request = request.create_bucket_configuration(configuration);
        }

        request
            .send()
            .await
            .map_err(|e| BackendError::Request(format!("S3 create_bucket failed: {}", e)))?;

        info!(bucket = %container, region = ?self.region, "Created S3 bucket");
        Ok(())
    }

    async fn delete_all(&self, container: &str) -> Result<()> {
        let mut deleted = 0usize;
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self.client.list_objects_v2().bucket(container);

            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| BackendError::Request(format!("S3 list failed: {}", e)))?;

            let identifiers = response
                .contents()
                .iter()
                .filter_map(|object| object.key())
                .map(|key| ObjectIdentifier::builder().key(key).build())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| BackendError::Request(format!("S3 object identifier: {}", e)))?;

            // list_objects_v2 pages hold at most 1000 keys, the delete_objects limit
            if !identifiers.is_empty() {
                let count = identifiers.len();
                let delete = Delete::builder()
                    .set_objects(Some(identifiers))
                    .quiet(true)
                    .build()
                    .map_err(|e| BackendError::Request(format!("S3 delete request: {}", e)))?;

                let output = self
                    .client
                    .delete_objects()
                    .bucket(container)
                    .delete(delete)
                    .send()
                    .await
                    .map_err(|e| {
                        BackendError::Request(format!("S3 delete_objects failed: {}", e))
                    })?;

                if let Some(error) = output.errors().first() {
                    return Err(BackendError::Request(format!(
                        "S3 delete_objects failed for {} of {} keys, first: {:?} {:?}",
                        output.errors().len(),
                        count,
                        error.key(),
                        error.message()
                    )));
                }
                deleted += count;
            }

            continuation_token = response.next_continuation_token().map(|s| s.to_string());
            if continuation_token.is_none() {
                break;
            }
        }

        self.client
            .delete_bucket()
            .bucket(container)
            .send()
            .await
            .map_err(|e| BackendError::Request(format!("S3 delete_bucket failed: {}", e)))?;

        debug!(bucket = %container, deleted, "Deleted S3 bucket and its objects");
        Ok(())
    }

    fn kind(&self) -> BackendKind {
        BackendKind::S3
    }
}
