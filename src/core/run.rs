//! Run orchestration.
//!
//! Checks the bucket, starts the fetch for every category at once, then
//! handles the results one category at a time: SSH keys, env files, git
//! credentials. The first fatal error ends the run; fetches still in flight
//! are left to finish and their results are dropped.

use serde::Serialize;
use tracing::{info, warn};

use crate::core::category::Category;
use crate::core::config::RunConfig;
use crate::core::fetch::{fetch_all, FetchStream};
use crate::core::handlers;
use crate::error::{Result, StoreError};

/// What a successful run applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Keys loaded into the agent.
    pub ssh_keys: usize,
    /// Env files written to the sink.
    pub env_files: usize,
    /// Credential helpers configured.
    pub git_credentials: usize,
    /// The repository looks SSH-based but no key was found.
    pub missing_ssh_key: bool,
}

/// Download secrets from the configured bucket and hand them to their consumers.
///
/// # Errors
///
/// Returns `StoreError::BucketNotFound` before any fetch if the bucket is
/// missing or cannot be checked, and the first agent or sink error otherwise.
pub async fn run(conf: &RunConfig) -> Result<Summary> {
    info!(bucket = %conf.bucket, prefix = %conf.prefix, "downloading secrets from {}", conf.bucket);

    match conf.store.bucket_exists(&conf.bucket).await {
        Ok(true) => {}
        Ok(false) => {
            warn!("bucket {:?} doesn't exist", conf.bucket);
            return Err(StoreError::BucketNotFound(conf.bucket.clone()).into());
        }
        Err(e) => {
            warn!(kind = e.kind(), "bucket {:?} doesn't exist: {}", conf.bucket, e);
            return Err(StoreError::BucketNotFound(conf.bucket.clone()).into());
        }
    }

    let [ssh, env, git] = Category::ALL.map(|category| dispatch(conf, category));

    let ssh_keys = handlers::handle_ssh_keys(conf, ssh).await?;
    let env_files = handlers::handle_envs(conf, env).await?;
    let git_credentials = handlers::handle_git_credentials(conf, git).await?;

    let summary = Summary {
        ssh_keys,
        env_files,
        git_credentials,
        missing_ssh_key: ssh_keys == 0 && conf.uses_ssh_transport(),
    };
    info!(
        ssh_keys = summary.ssh_keys,
        env_files = summary.env_files,
        git_credentials = summary.git_credentials,
        "secrets loaded"
    );
    Ok(summary)
}

/// Start fetching every candidate key of `category`.
fn dispatch(conf: &RunConfig, category: Category) -> FetchStream {
    let keys = category.keys(&conf.prefix);
    info!("checking {} for {}:", conf.bucket, category);
    for key in &keys {
        info!("- {}", key);
    }
    fetch_all(conf.store.clone(), &conf.bucket, keys)
}
