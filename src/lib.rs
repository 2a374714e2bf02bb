//! docbuild - Documentation build driver
//!
//! Runs Doxygen against the repository's `config` file, then builds the
//! Sphinx site in `docs/sphinx` (whose Breathe configuration reads Doxygen's
//! XML output).
//!
//! # Modules
//!
//! - `adapters`: External command execution (CommandRunner, ProcessRunner)
//! - `core`: Build steps and orchestration (DoxygenStep, SphinxStep, Orchestrator)
//! - `domain`: Data structures (OutputFormat, BuildReport)
//! - `config`: docbuild.yaml loading
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Full build from the repository root
//! docbuild
//!
//! # Doxygen only, keeping just the xml output
//! docbuild doxygen --only-xml
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{CommandRunner, ExitOutcome, Invocation, ProcessRunner, ToolError};
pub use config::ResolvedConfig;
pub use crate::core::{BuildError, Orchestrator, WorkingDir};
pub use domain::{BuildReport, BuildState, OutputFormat, StepKind};
