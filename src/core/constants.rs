//! Constants used throughout bucket-secrets.
//!
//! Centralizes well-known key names and environment variable names.

/// SSH private key object names, probed under the prefix and at bucket root.
pub const SSH_KEY_NAMES: &[&str] = &["private_ssh_key", "id_rsa_github"];

/// Environment file object names, probed at bucket root and under the prefix.
pub const ENV_FILE_NAMES: &[&str] = &["env", "environment"];

/// Git credentials object name, probed at bucket root and under the prefix.
pub const GIT_CREDENTIALS_NAME: &str = "git-credentials";

/// Repository URL prefix indicating SSH transport.
pub const SSH_REPO_PREFIX: &str = "git@";

/// Environment variable git reads extra `-c` configuration from.
pub const GIT_CONFIG_PARAMETERS: &str = "GIT_CONFIG_PARAMETERS";

/// File name of the credential-helper executable.
pub const CREDENTIAL_HELPER_BIN: &str = "git-credential-bucket-secrets";

/// Name git expands to [`CREDENTIAL_HELPER_BIN`] when looking up a helper.
pub const CREDENTIAL_HELPER_SHORT_NAME: &str = "bucket-secrets";

/// Environment variable carrying the ssh-agent process id.
pub const SSH_AGENT_PID_VAR: &str = "SSH_AGENT_PID";

/// Environment variable overriding the log filter.
pub const LOG_ENV_VAR: &str = "BUCKET_SECRETS_LOG";
