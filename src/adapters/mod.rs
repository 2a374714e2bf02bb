//! Adapter interfaces for external documentation tools.
//!
//! Every external program (Doxygen, `make`) is launched through a
//! [`CommandRunner`], so the build steps never touch `std::process` directly
//! and tests can substitute a recording fake.

pub mod process;

use async_trait::async_trait;
use thiserror::Error;

// Re-export the subprocess runner
pub use process::ProcessRunner;

/// A single external command: program name plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute (looked up on `PATH` when not a path)
    pub program: String,

    /// Arguments passed verbatim
    pub args: Vec<String>,
}

impl Invocation {
    /// Create an invocation from a program and its arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How an external command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ExitOutcome {
    /// A successful (zero) exit
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    /// Exit with the given code
    pub fn code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Whether the command exited with status zero
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into a [`ToolError::Failed`]
    pub fn into_result(self, program: &str) -> Result<(), ToolError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                program: program.to_string(),
                code: self.code,
            })
        }
    }
}

impl From<std::process::ExitStatus> for ExitOutcome {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// External tool invocation failures.
///
/// The build does not distinguish between these for recovery purposes; they
/// all abort the build.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' {}", describe_exit(.code))]
    Failed { program: String, code: Option<i32> },

    #[error("'{program}' timed out after {seconds}s")]
    Timeout { program: String, seconds: u64 },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Capability to run an external command and report its exit status.
///
/// The command runs in the current working directory of the process and
/// inherits its standard streams.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Human-readable runner name
    fn name(&self) -> &str;

    /// Run the command to completion
    async fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, ToolError>;
}
