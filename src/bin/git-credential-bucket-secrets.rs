//! git credential helper serving credentials from a bucket.
//!
//! Configured by `bucket-secrets load` through GIT_CONFIG_PARAMETERS.

use clap::Parser;

use bucket_secrets::cli::credential::{execute, CredentialCli};
use bucket_secrets::cli::{init_tracing, output};

fn main() {
    let cli = CredentialCli::parse();
    // git relays helper stderr to the user; stay quiet unless asked
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = execute(cli, &mut stdin, &mut stdout) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
