//! Load command.
//!
//! Downloads secrets and hands them out: SSH keys to the agent, env files
//! and the git credential configuration to the env sink.

use std::fs::OpenOptions;
use std::sync::Arc;

use crate::cli::output;
use crate::cli::LoadArgs;
use crate::core::agent::SshAdd;
use crate::core::config::{
    credential_helper_command, default_credential_helper, resolve_prefix, RunConfig,
};
use crate::core::run::{run, Summary};
use crate::core::sink::EnvSink;
use crate::core::store;
use crate::error::Result;

/// Run the download for the given arguments.
pub fn execute(args: LoadArgs) -> Result<()> {
    let rt = crate::cli::runtime()?;
    let summary = rt.block_on(async {
        let conf = build_config(args).await?;
        run(&conf).await
    })?;
    report(&summary);
    Ok(())
}

async fn build_config(args: LoadArgs) -> Result<RunConfig> {
    let prefix = resolve_prefix(
        args.prefix.prefix.as_deref(),
        args.prefix.pipeline_slug.as_deref(),
    )?;
    // git runs the helper from its own working directory
    let store_dir = match args.store.store_dir {
        Some(dir) if dir.is_relative() => Some(std::env::current_dir()?.join(dir)),
        other => other,
    };
    let store = store::select(store_dir.clone()).await?;

    let sink = match &args.env_file {
        Some(path) => EnvSink::new(OpenOptions::new().create(true).append(true).open(path)?),
        None => EnvSink::stdout(),
    };

    let helper = args.git_credential_helper.unwrap_or_else(|| {
        let exe = std::env::current_exe().ok();
        default_credential_helper(exe.as_deref())
    });
    let git_credential_helper = credential_helper_command(&helper, store_dir.as_deref());

    Ok(RunConfig {
        repo: args.repo,
        bucket: args.bucket,
        prefix,
        store,
        agent: Arc::new(SshAdd::from_env()),
        sink,
        git_credential_helper,
    })
}

fn report(summary: &Summary) {
    output::success(&format!(
        "loaded {}, {}, {}",
        output::count(summary.ssh_keys, "ssh key", "ssh keys"),
        output::count(summary.env_files, "env file", "env files"),
        output::count(summary.git_credentials, "git credential helper", "git credential helpers"),
    ));
    if summary.missing_ssh_key {
        output::warn("repository uses SSH but no SSH key was found in the bucket");
        output::hint("upload one as <prefix>/private_ssh_key or private_ssh_key");
    }
}
