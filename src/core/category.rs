//! Secret categories and the candidate keys probed for each.
//!
//! Every candidate is fetched; a category may yield zero, one, or several
//! hits and all of them are applied. The list order is discovery order,
//! not precedence.

use serde::Serialize;

use crate::core::constants::{ENV_FILE_NAMES, GIT_CREDENTIALS_NAME, SSH_KEY_NAMES};
use crate::core::types::LookupKey;

/// Kind of secret, each with its own key set and handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SshKeys,
    EnvFiles,
    GitCredentials,
}

impl Category {
    /// All categories in handling order.
    pub const ALL: [Category; 3] = [Self::SshKeys, Self::EnvFiles, Self::GitCredentials];

    /// Human-readable name used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SshKeys => "SSH keys",
            Self::EnvFiles => "environment files",
            Self::GitCredentials => "git credentials",
        }
    }

    /// Candidate lookup keys for this category under `prefix`.
    pub fn keys(&self, prefix: &str) -> Vec<LookupKey> {
        let scoped = |name: &str| format!("{}/{}", prefix, name);
        match self {
            // pipeline-scoped keys first, then bucket-wide
            Self::SshKeys => SSH_KEY_NAMES
                .iter()
                .map(|n| scoped(n))
                .chain(SSH_KEY_NAMES.iter().map(|n| n.to_string()))
                .collect(),
            // bucket-wide env first so pipeline values are appended after it
            Self::EnvFiles => ENV_FILE_NAMES
                .iter()
                .map(|n| n.to_string())
                .chain(ENV_FILE_NAMES.iter().map(|n| scoped(n)))
                .collect(),
            Self::GitCredentials => {
                vec![GIT_CREDENTIALS_NAME.to_string(), scoped(GIT_CREDENTIALS_NAME)]
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
