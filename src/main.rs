//! bucket-secrets - Load CI job secrets from a blob-store bucket.

use clap::Parser;

use bucket_secrets::cli::output;
use bucket_secrets::cli::{execute, init_tracing, Cli};
use bucket_secrets::error::{AgentError, ConfigError, Error, StoreError};

fn main() {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "info" });

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingPrefix) => {
                Some("set BUILDKITE_PLUGIN_S3_SECRETS_BUCKET_PREFIX or BUILDKITE_PIPELINE_SLUG")
            }
            Error::Config(ConfigError::NoStore) => Some("pass --store-dir <DIR>"),
            Error::Store(StoreError::BucketNotFound(_)) => {
                Some("check BUILDKITE_PLUGIN_S3_SECRETS_BUCKET and your credentials")
            }
            Error::Agent(AgentError::NotInstalled) => Some("install the openssh client"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
