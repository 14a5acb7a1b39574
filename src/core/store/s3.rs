//! AWS S3 blob store.
//!
//! Enable with `--features aws`. Credentials and region come from the
//! default AWS provider chain (AWS_ACCESS_KEY_ID, instance profile, etc.).

use async_trait::async_trait;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use tracing::trace;

use super::BlobStore;
use crate::error::FetchError;

/// S3-backed blob store.
#[derive(Debug, Clone)]
pub struct S3 {
    client: aws_sdk_s3::Client,
}

impl S3 {
    /// Create a store from an existing client.
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Create a store using AWS config loaded from the environment.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }
}

/// Map an SDK failure to a lookup error kind using the HTTP status.
fn classify<E>(err: SdkError<E, HttpResponse>) -> FetchError
where
    E: std::error::Error + Send + Sync + 'static,
{
    match err.raw_response().map(|r| r.status().as_u16()) {
        Some(404) => FetchError::NotFound,
        Some(403) => FetchError::Forbidden,
        _ => FetchError::Other(DisplayErrorContext(&err).to_string()),
    }
}

#[async_trait]
impl BlobStore for S3 {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        trace!(bucket, key, "s3 get_object");
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(classify)?;

        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| FetchError::Other(format!("reading body: {}", e)))?;

        Ok(body.into_bytes().to_vec())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool, FetchError> {
        trace!(bucket, "s3 head_bucket");
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => match classify(e) {
                FetchError::NotFound => Ok(false),
                other => Err(other),
            },
        }
    }
}
