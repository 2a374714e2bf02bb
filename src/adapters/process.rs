//! Subprocess runner backed by `tokio::process`.
//!
//! Children inherit stdin/stdout/stderr so the tools print their own
//! diagnostics. No timeout is applied unless one is configured.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{CommandRunner, ExitOutcome, Invocation, ToolError};

/// Runs invocations as real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    /// Per-command timeout (`None` waits forever)
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner with no timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner that kills commands running longer than `limit`
    pub fn with_timeout(limit: Duration) -> Self {
        Self {
            timeout: Some(limit),
        }
    }

    /// The configured timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    fn name(&self) -> &str {
        "process"
    }

    async fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, ToolError> {
        debug!(command = %invocation, "Spawning");

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ToolError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let status = match self.timeout {
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    // Reap the child before reporting
                    if let Err(e) = child.kill().await {
                        warn!(
                            program = %invocation.program,
                            error = %e,
                            "Failed to kill timed-out process"
                        );
                    }
                    return Err(ToolError::Timeout {
                        program: invocation.program.clone(),
                        seconds: limit.as_secs(),
                    });
                }
            },
            None => child.wait().await,
        }
        .map_err(|source| ToolError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        Ok(ExitOutcome::from(status))
    }
}
