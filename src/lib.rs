//! bucket-secrets - Load CI job secrets from a blob-store bucket.
//!
//! Fetches SSH private keys, env files and git-credentials blobs from a
//! bucket and hands each one to its consumer: the ssh-agent, the job's env
//! stream, and a git credential helper.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── load          # Download and apply secrets
//! │   ├── keys          # Show the candidate keys
//! │   ├── credential    # git credential helper entry point
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── fetch         # Ordered concurrent fetch
//!     ├── category      # Candidate keys per secret category
//!     ├── handlers      # ssh-agent / env / git-credentials handlers
//!     ├── run           # Orchestration
//!     ├── config        # Run configuration
//!     ├── store/        # Blob stores
//!     │   ├── mod       # BlobStore trait
//!     │   ├── fs        # Directory-backed store
//!     │   └── s3        # AWS S3 (feature `aws`)
//!     ├── agent/        # Key registration (ssh-add)
//!     ├── sink          # Shared env sink
//!     └── credential    # git credential-helper protocol
//! ```
//!
//! # Features
//!
//! - Every candidate key is fetched in parallel; results are applied in a
//!   fixed order
//! - Missing secrets are warnings, not failures
//! - Secret payloads are zeroized after use
//! - Pluggable blob stores and agents

pub mod cli;
pub mod core;
pub mod error;
