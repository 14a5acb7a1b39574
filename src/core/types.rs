//! Type aliases for domain concepts.

/// Location of a secret within a bucket (e.g., `my-pipeline/private_ssh_key`).
pub type LookupKey = String;

/// Name of a blob-store bucket.
pub type BucketName = String;
