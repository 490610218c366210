//! `ToolchainPort` backed by real child processes.

use std::io;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use cpptraj_config_core::{ToolInvocation, ToolOutput, ToolchainError, ToolchainPort};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// How long a single trial compilation may run before it is killed.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs compiler invocations as child processes with a time bound.
#[derive(Debug, Clone, Copy)]
pub struct ProcessToolchain {
    timeout: Duration,
}

impl Default for ProcessToolchain {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl ProcessToolchain {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ToolchainPort for ProcessToolchain {
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolchainError> {
        let program = invocation.program.clone();

        // A missing working directory also surfaces as NotFound from spawn.
        if !invocation.working_dir.is_dir() {
            return Err(ToolchainError::Spawn {
                program,
                reason: format!(
                    "working directory {} does not exist",
                    invocation.working_dir.display()
                ),
            });
        }

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the output future on timeout must not leave a compiler behind.
            .kill_on_drop(true);

        debug!("Spawning {invocation}");

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ToolchainError::NotFound { program });
            }
            Ok(Err(e)) => {
                return Err(ToolchainError::Spawn {
                    program,
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                warn!("{program} exceeded {:?}, killed", self.timeout);
                return Err(ToolchainError::TimedOut {
                    program,
                    after: self.timeout,
                });
            }
        };

        Ok(ToolOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
