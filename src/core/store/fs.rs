//! Filesystem-backed blob store.
//!
//! Each bucket is a directory under a root; each key is a relative path
//! inside it. Used for local runs and for CI agents with secrets mounted
//! from a volume.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::trace;

use super::BlobStore;
use crate::error::FetchError;

/// Filesystem blob store rooted at a directory.
#[derive(Debug, Clone)]
pub struct Filesystem {
    root: PathBuf,
}

impl Filesystem {
    /// Create a store whose buckets are the sub-directories of `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `bucket/key` to a path, refusing anything that would escape the bucket.
    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, FetchError> {
        let bucket_dir = self.bucket_path(bucket)?;
        let key_path = Path::new(key);
        if key.is_empty() || !key_path.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(FetchError::InvalidKey(key.to_string()));
        }
        Ok(bucket_dir.join(key_path))
    }

    fn bucket_path(&self, bucket: &str) -> Result<PathBuf, FetchError> {
        let mut components = Path::new(bucket).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(bucket)),
            _ => Err(FetchError::InvalidKey(bucket.to_string())),
        }
    }
}

fn classify(err: std::io::Error) -> FetchError {
    match err.kind() {
        ErrorKind::NotFound => FetchError::NotFound,
        ErrorKind::PermissionDenied => FetchError::Forbidden,
        _ => FetchError::Other(err.to_string()),
    }
}

#[async_trait]
impl BlobStore for Filesystem {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.object_path(bucket, key)?;
        trace!(path = %path.display(), "reading object");
        tokio::fs::read(&path).await.map_err(classify)
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool, FetchError> {
        let path = self.bucket_path(bucket)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(classify(e)),
        }
    }
}
