//! Secret handlers.
//!
//! Each handler drains one category's ordered result stream to the end,
//! applies its side effect for every successful lookup and logs every
//! failed one. Lookup failures never fail a run; agent and sink failures do.
//! Effects already applied are not rolled back.

use std::borrow::Cow;

use futures::StreamExt;
use tracing::{info, warn};
use zeroize::Zeroize;

use crate::core::config::RunConfig;
use crate::core::constants::GIT_CONFIG_PARAMETERS;
use crate::core::fetch::{FetchResult, FetchStream};
use crate::error::{Result, SinkError};

fn log_lookup_failure(what: &str, r: &FetchResult) {
    if let Some(e) = r.error() {
        warn!(
            bucket = %r.bucket,
            key = %r.key,
            kind = e.kind(),
            "failed to download {} from {}/{}: {}",
            what,
            r.bucket,
            r.key,
            e
        );
    }
}

/// Load every SSH key found into the agent.
///
/// Returns the number of keys loaded. Finding none while the repository uses
/// SSH transport is only a warning.
///
/// # Errors
///
/// Returns `AgentError` as soon as the agent rejects a key.
pub async fn handle_ssh_keys(conf: &RunConfig, mut results: FetchStream) -> Result<usize> {
    let mut loaded = 0;

    while let Some(r) = results.next().await {
        let Some(data) = r.data() else {
            log_lookup_failure("ssh key", &r);
            continue;
        };
        info!(
            "loading {}/{} ({} bytes) into ssh-agent (pid {})",
            r.bucket,
            r.key,
            data.len(),
            conf.agent.pid()
        );
        conf.agent.add(data).await?;
        loaded += 1;
    }

    if loaded == 0 && conf.uses_ssh_transport() {
        warn!("failed to find an SSH key in secret bucket");
        warn!(
            "the repository {:?} appears to use SSH for transport, but no SSH keys were found in the {:?} bucket",
            conf.repo, conf.bucket
        );
    }

    Ok(loaded)
}

/// Append every env file found to the sink, in discovery order.
///
/// Returns the number of files written. Zero-byte files are skipped rather
/// than written as a lone newline; they are not counted.
///
/// # Errors
///
/// Returns `SinkError::Env` if the sink rejects a write.
pub async fn handle_envs(conf: &RunConfig, mut results: FetchStream) -> Result<usize> {
    let mut written = 0;

    while let Some(r) = results.next().await {
        let Some(data) = r.data() else {
            log_lookup_failure("env", &r);
            continue;
        };
        if data.is_empty() {
            info!("skipping empty env file {}/{}", r.bucket, r.key);
            continue;
        }

        info!("loading {}/{} ({} bytes) of env", r.bucket, r.key, data.len());
        let payload = with_trailing_newline(data);
        let written_ok = conf.sink.write_all(&payload);
        if let Cow::Owned(mut copy) = payload {
            copy.zeroize();
        }
        written_ok.map_err(SinkError::Env)?;
        written += 1;
    }

    Ok(written)
}

/// Register every git-credentials blob found as a credential helper.
///
/// All helpers go into a single `GIT_CONFIG_PARAMETERS` line, written once
/// after the stream is drained; nothing is written when none were found.
/// Returns the number of helpers configured.
///
/// # Errors
///
/// Returns `SinkError::GitConfig` if the sink rejects the write.
pub async fn handle_git_credentials(conf: &RunConfig, mut results: FetchStream) -> Result<usize> {
    let mut helpers = Vec::new();

    while let Some(r) = results.next().await {
        if r.error().is_some() {
            log_lookup_failure("git-credentials", &r);
            continue;
        }
        info!(
            "adding git-credentials in {}/{} as a credential helper",
            r.bucket, r.key
        );
        helpers.push(helper_descriptor(
            &conf.git_credential_helper,
            &r.bucket,
            &r.key,
        ));
    }

    if helpers.is_empty() {
        return Ok(0);
    }

    conf.sink
        .write_all(git_config_line(&helpers).as_bytes())
        .map_err(SinkError::GitConfig)?;

    Ok(helpers.len())
}

/// Return `data` unchanged if it ends in a newline, otherwise a copy with one appended.
pub fn with_trailing_newline(data: &[u8]) -> Cow<'_, [u8]> {
    if data.ends_with(b"\n") {
        Cow::Borrowed(data)
    } else {
        let mut owned = Vec::with_capacity(data.len() + 1);
        owned.extend_from_slice(data);
        owned.push(b'\n');
        Cow::Owned(owned)
    }
}

/// Single-quoted `-c` style entry telling git to run the helper for one blob.
pub fn helper_descriptor(helper: &str, bucket: &str, key: &str) -> String {
    format!("'credential.helper={} {} {}'", helper, bucket, key)
}

/// `GIT_CONFIG_PARAMETERS=<descriptors>` line, descriptors space-separated.
pub fn git_config_line(descriptors: &[String]) -> String {
    format!("{}={}\n", GIT_CONFIG_PARAMETERS, descriptors.join(" "))
}
