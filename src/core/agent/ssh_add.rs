//! Agent backed by the `ssh-add` command.
//!
//! Keys are piped to `ssh-add -`, which forwards them to the agent named by
//! `SSH_AUTH_SOCK`. Nothing touches disk.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::Agent;
use crate::core::constants;
use crate::error::AgentError;

/// Registers keys by running `ssh-add -`.
#[derive(Debug, Clone)]
pub struct SshAdd {
    program: PathBuf,
    pid: u32,
}

impl SshAdd {
    /// Use `ssh-add` from PATH and read the agent pid from the environment.
    ///
    /// A missing `ssh-add` is only reported when a key is actually added.
    pub fn from_env() -> Self {
        let program = which::which("ssh-add").unwrap_or_else(|_| PathBuf::from("ssh-add"));
        let pid = std::env::var(constants::SSH_AGENT_PID_VAR)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        Self::new(program, pid)
    }

    /// Use an explicit `ssh-add` binary and agent pid.
    pub fn new(program: impl Into<PathBuf>, pid: u32) -> Self {
        Self {
            program: program.into(),
            pid,
        }
    }
}

async fn write_key(stdin: &mut tokio::process::ChildStdin, key: &[u8]) -> std::io::Result<()> {
    stdin.write_all(key).await?;
    if !key.ends_with(b"\n") {
        stdin.write_all(b"\n").await?;
    }
    stdin.flush().await
}

#[async_trait]
impl Agent for SshAdd {
    async fn add(&self, key: &[u8]) -> Result<(), AgentError> {
        debug!(program = %self.program.display(), bytes = key.len(), "running ssh-add");

        let mut child = Command::new(&self.program)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AgentError::NotInstalled,
                _ => AgentError::Spawn(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // an early exit closes the pipe; the exit status carries the reason
            if let Err(e) = write_key(&mut stdin, key).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(AgentError::Spawn(e));
                }
            }
            // ssh-add reads until EOF
            drop(stdin);
        }

        let output = child.wait_with_output().await.map_err(AgentError::Spawn)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("ssh-add exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(AgentError::Add(reason));
        }

        Ok(())
    }

    fn pid(&self) -> u32 {
        self.pid
    }
}
