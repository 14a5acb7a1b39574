//! git credential helper entry point.
//!
//! Git invokes the helper as `<helper> <bucket> <key> <action>` with the
//! request on stdin; the descriptors written by `load` supply the first two.

use std::io::{Read, Write};

use clap::Parser;
use tracing::debug;

use crate::cli::StoreArgs;
use crate::core::credential::{self, Action, Request};
use crate::core::store;
use crate::error::{Result, StoreError};

/// git-credential-bucket-secrets - Answer git credential requests from a bucket.
#[derive(Parser, Debug)]
#[command(name = "git-credential-bucket-secrets", version)]
pub struct CredentialCli {
    /// Bucket holding the git-credentials blob
    pub bucket: String,

    /// Key of the git-credentials blob
    pub key: String,

    /// Action requested by git: get, store or erase
    pub action: String,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Handle one git credential request.
///
/// Only `get` does anything; git also sends `store` and `erase` to every
/// helper, and the bucket is read-only.
pub fn execute(args: CredentialCli, input: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    let action: Action = args.action.parse()?;
    if action != Action::Get {
        debug!(?action, "ignoring credential action");
        return Ok(());
    }

    let mut raw = String::new();
    input.read_to_string(&mut raw)?;
    let request = Request::parse(&raw)?;

    let rt = crate::cli::runtime()?;
    let blob = rt.block_on(async {
        let store = store::select(args.store.store_dir.clone()).await?;
        store
            .get(&args.bucket, &args.key)
            .await
            .map_err(|source| StoreError::Fetch {
                bucket: args.bucket.clone(),
                key: args.key.clone(),
                source,
            })
            .map_err(crate::error::Error::from)
    })?;
    let blob = zeroize::Zeroizing::new(blob);

    let creds = credential::parse_store(&blob)?;
    match credential::find(&creds, &request) {
        Some(cred) => {
            debug!(host = %cred.host, username = %cred.username, "credential found");
            out.write_all(cred.to_response().as_bytes())?;
            out.flush()?;
        }
        // no output lets git fall through to the next helper
        None => debug!(
            host = request.host.as_deref().unwrap_or(""),
            "no matching credential"
        ),
    }
    Ok(())
}
