//! Blob store selection.
//!
//! Decides which backend serves a run: an explicit store directory wins,
//! otherwise S3 when the `aws` feature is compiled in.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::{BlobStore, Filesystem};
use crate::error::Result;

/// Select the blob store for this invocation.
///
/// # Errors
///
/// Returns `ConfigError::NoStore` if no directory is given and S3 support
/// is not compiled in.
pub async fn select(store_dir: Option<PathBuf>) -> Result<Arc<dyn BlobStore>> {
    if let Some(dir) = store_dir {
        info!(root = %dir.display(), "using filesystem blob store");
        return Ok(Arc::new(Filesystem::new(dir)));
    }

    #[cfg(feature = "aws")]
    {
        info!("using S3 blob store");
        Ok(Arc::new(super::S3::from_env().await))
    }

    #[cfg(not(feature = "aws"))]
    {
        Err(crate::error::ConfigError::NoStore.into())
    }
}
