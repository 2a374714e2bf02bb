//! Domain types for the documentation build.
//!
//! This module contains:
//! - Outputs: The Doxygen output formats and their directories
//! - Report: Record of a single build

pub mod outputs;
pub mod report;

// Re-export commonly used types
pub use outputs::OutputFormat;
pub use report::{BuildReport, BuildState, StepKind, StepReport};
