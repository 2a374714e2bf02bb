//! Core build logic.
//!
//! This module contains:
//! - DoxygenStep: Source extraction and output cleanup
//! - SphinxStep: Static site generation
//! - WorkingDir: Scoped working-directory changes
//! - Orchestrator: Runs the steps in order

pub mod doxygen;
pub mod error;
pub mod orchestrator;
pub mod sphinx;
pub mod workdir;

// Re-export commonly used types
pub use doxygen::DoxygenStep;
pub use error::BuildError;
pub use orchestrator::Orchestrator;
pub use sphinx::SphinxStep;
pub use workdir::WorkingDir;
