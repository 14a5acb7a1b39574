//! Blob store access.
//!
//! Abstracts the key-value store secrets are fetched from, with
//! implementations for different backends.
//!
//! ## Adding a New Blob Store
//!
//! 1. Implement the `BlobStore` trait
//! 2. Add the implementation in a new file (e.g., `gcs.rs`)
//! 3. Wire it into `backend::select`
//!
//! ## Example
//!
//! ```ignore
//! struct Gcs { /* ... */ }
//!
//! #[async_trait]
//! impl BlobStore for Gcs {
//!     async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
//!         // Download the object
//!     }
//!     async fn bucket_exists(&self, bucket: &str) -> Result<bool, FetchError> {
//!         // Check the bucket
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::error::FetchError;

mod backend;
mod fs;

#[cfg(feature = "aws")]
mod s3;

pub use backend::select;
pub use fs::Filesystem;

#[cfg(feature = "aws")]
pub use s3::S3;

/// Blob store capability.
///
/// Implementations own their transport, credentials and retry policy;
/// callers only see bytes or a classified [`FetchError`].
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the object stored under `key` in `bucket`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::NotFound` if the object does not exist,
    /// `FetchError::Forbidden` if access is denied, or another kind for
    /// transport and decoding failures.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError>;

    /// Check whether `bucket` exists and is reachable.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, FetchError>;
}
