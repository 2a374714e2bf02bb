//! Build errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::adapters::ToolError;

/// Errors that abort a documentation build
#[derive(Debug, Error)]
pub enum BuildError {
    /// A fixed input (Doxygen config file, Sphinx source directory) is absent
    #[error("Required input not found: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("Failed to change working directory to {}: {source}", .path.display())]
    WorkingDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl BuildError {
    /// The external tool failure behind this error, if any
    pub fn tool_error(&self) -> Option<&ToolError> {
        match self {
            Self::Tool(e) => Some(e),
            _ => None,
        }
    }
}
