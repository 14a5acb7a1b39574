//! Key registration with an ssh-agent-like service.

use async_trait::async_trait;

use crate::error::AgentError;

mod ssh_add;

pub use ssh_add::SshAdd;

/// A process that holds private keys on behalf of the job.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Register a private key.
    ///
    /// # Errors
    ///
    /// Returns `AgentError` if the agent rejects the key or cannot be reached.
    async fn add(&self, key: &[u8]) -> Result<(), AgentError>;

    /// Process id of the agent, for diagnostics.
    fn pid(&self) -> u32;
}
