//! Command-line interface.

pub mod completions;
pub mod credential;
pub mod keys;
pub mod load;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::core::constants;

/// bucket-secrets - Load CI job secrets from a blob-store bucket.
#[derive(Parser)]
#[command(
    name = "bucket-secrets",
    about = "Load SSH keys, env files and git credentials from a secrets bucket",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Download secrets: keys go to ssh-agent, env lines to stdout (or --env-file)
    Load(LoadArgs),

    /// Show the keys that would be looked up in the bucket
    Keys {
        #[command(flatten)]
        prefix: PrefixArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Where secret keys live within the bucket.
#[derive(Args, Debug, Clone)]
pub struct PrefixArgs {
    /// Key prefix within the bucket
    #[arg(long, env = "BUILDKITE_PLUGIN_S3_SECRETS_BUCKET_PREFIX")]
    pub prefix: Option<String>,

    /// Pipeline slug, used as the prefix when none is given
    #[arg(long, env = "BUILDKITE_PIPELINE_SLUG")]
    pub pipeline_slug: Option<String>,
}

/// Which blob store to read from.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Read buckets from sub-directories of this directory instead of S3
    #[arg(long, env = "BUCKET_SECRETS_STORE_DIR")]
    pub store_dir: Option<PathBuf>,
}

/// Arguments for `load`.
#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Bucket to read secrets from
    #[arg(long, env = "BUILDKITE_PLUGIN_S3_SECRETS_BUCKET")]
    pub bucket: String,

    /// Repository URL of the job; SSH URLs warn when no key is found
    #[arg(long, env = "BUILDKITE_REPO", default_value = "")]
    pub repo: String,

    #[command(flatten)]
    pub prefix: PrefixArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Append env output to this file instead of stdout
    #[arg(long, env = "BUCKET_SECRETS_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Credential helper path written into GIT_CONFIG_PARAMETERS
    #[arg(long, env = "BUCKET_SECRETS_GIT_CREDENTIAL_HELPER")]
    pub git_credential_helper: Option<String>,
}

/// Install the tracing subscriber. Logs go to stderr; stdout carries env output.
///
/// `level` applies to this crate unless BUCKET_SECRETS_LOG overrides it.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_env(constants::LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(format!("bucket_secrets={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Load(args) => load::execute(args),
        Keys { prefix, json } => keys::execute(&prefix, json),
        Completions { shell } => completions::execute(shell, &mut std::io::stdout()),
    }
}

/// Build the multi-threaded runtime commands run their async work on.
pub(crate) fn runtime() -> crate::error::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| crate::error::ConfigError::Runtime(e).into())
}
