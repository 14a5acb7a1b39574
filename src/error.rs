//! Error types for bucket-secrets.
//!
//! Each domain has its own error enum; they are unified under [`Error`]
//! so that `?` works across module boundaries.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invocation configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no key prefix: set a bucket prefix or a pipeline slug")]
    MissingPrefix,

    #[error("no blob store configured: pass --store-dir or build with the `aws` feature")]
    NoStore,

    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),
}

/// Blob store failures that abort a run.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("bucket {0:?} not found")]
    BucketNotFound(String),

    #[error("failed to fetch {bucket}/{key}: {source}")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: FetchError,
    },
}

/// Outcome of a single failed lookup.
///
/// Lookup failures are recoverable: the key is treated as absent. The kind
/// is kept so callers can tell a missing key from a denied one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("not found")]
    NotFound,

    #[error("access denied")]
    Forbidden,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Short label for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidKey(_) => "invalid_key",
            Self::Other(_) => "other",
        }
    }
}

/// Key-registration service failures.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("ssh-agent add: {0}")]
    Add(String),

    #[error("ssh-agent add: ssh-add not found on PATH")]
    NotInstalled,

    #[error("ssh-agent add: failed to run ssh-add: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Environment sink write failures.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("copying env: {0}")]
    Env(#[source] std::io::Error),

    #[error("writing GIT_CONFIG_PARAMETERS env: {0}")]
    GitConfig(#[source] std::io::Error),
}

/// Git credential-helper protocol errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("malformed credential request line: {0}")]
    MalformedRequest(String),

    #[error("unsupported credential action: {0}")]
    UnknownAction(String),

    #[error("git-credentials blob is not valid UTF-8")]
    NotUtf8,
}

pub type Result<T> = std::result::Result<T, Error>;
