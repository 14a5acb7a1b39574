//! Run configuration.
//!
//! A [`RunConfig`] is assembled once per invocation and read by every
//! stage of the run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::core::agent::Agent;
use crate::core::constants;
use crate::core::sink::EnvSink;
use crate::core::store::BlobStore;
use crate::error::{ConfigError, Result};

/// Everything a run needs: where to look and where results go.
#[derive(Clone)]
pub struct RunConfig {
    /// Repository URL of the job, used to guess whether SSH keys are needed.
    pub repo: String,
    /// Bucket secrets are fetched from.
    pub bucket: String,
    /// Pipeline-scoped prefix within the bucket.
    pub prefix: String,
    pub store: Arc<dyn BlobStore>,
    pub agent: Arc<dyn Agent>,
    /// Receives env file contents and the git credential configuration.
    pub sink: EnvSink,
    /// Path to the git credential helper, used verbatim in helper descriptors.
    pub git_credential_helper: String,
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("repo", &self.repo)
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .field("git_credential_helper", &self.git_credential_helper)
            .finish_non_exhaustive()
    }
}

impl RunConfig {
    /// Whether the repository URL looks like SSH transport (`git@host:...`).
    pub fn uses_ssh_transport(&self) -> bool {
        self.repo.starts_with(constants::SSH_REPO_PREFIX)
    }
}

/// Pick the key prefix: an explicit prefix wins, otherwise the pipeline slug.
///
/// Empty values count as unset.
///
/// # Errors
///
/// Returns `ConfigError::MissingPrefix` if neither is set.
pub fn resolve_prefix(prefix: Option<&str>, pipeline_slug: Option<&str>) -> Result<String> {
    fn pick(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|v| !v.is_empty())
    }

    let prefix = pick(prefix)
        .or_else(|| pick(pipeline_slug))
        .ok_or(ConfigError::MissingPrefix)?;
    // keys are joined with '/', a trailing one would double it
    Ok(prefix.trim_end_matches('/').to_string())
}

/// Default credential helper: the helper binary installed next to `exe`,
/// else the one on PATH, else git's short name for it.
///
/// Git runs absolute paths as given but expands a bare name `x` to
/// `git-credential-x`, so the binary name itself must never be returned.
pub fn default_credential_helper(exe: Option<&Path>) -> String {
    let on_path = which::which(constants::CREDENTIAL_HELPER_BIN).ok();
    pick_credential_helper(exe, on_path)
}

fn pick_credential_helper(exe: Option<&Path>, on_path: Option<PathBuf>) -> String {
    let sibling: Option<PathBuf> = exe
        .and_then(Path::parent)
        .map(|dir| dir.join(constants::CREDENTIAL_HELPER_BIN))
        .filter(|p| p.is_file());

    match sibling.or(on_path) {
        Some(path) => {
            debug!(path = %path.display(), "using credential helper");
            path.display().to_string()
        }
        None => constants::CREDENTIAL_HELPER_SHORT_NAME.to_string(),
    }
}

/// Helper command line for descriptors; carries `--store-dir` so the helper
/// reads the same store the run did.
pub fn credential_helper_command(helper: &str, store_dir: Option<&Path>) -> String {
    match store_dir {
        Some(dir) => format!("{} --store-dir {}", helper, dir.display()),
        None => helper.to_string(),
    }
}
