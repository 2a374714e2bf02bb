//! Output formats produced by Doxygen.
//!
//! Doxygen writes one directory per format under its output directory. Only
//! the XML output is consumed downstream (by Breathe, from the Sphinx
//! configuration); the others can be discarded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A Doxygen output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Machine-readable XML, consumed by the site generator
    Xml,

    /// Human-readable HTML pages
    Html,

    /// LaTeX sources for typesetting
    Latex,
}

impl OutputFormat {
    /// Every format Doxygen is configured to emit
    pub const ALL: [OutputFormat; 3] = [Self::Xml, Self::Html, Self::Latex];

    /// Formats deleted when only the XML output is kept
    pub const DISCARDABLE: [OutputFormat; 2] = [Self::Html, Self::Latex];

    /// Directory name of this format under the output directory
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Latex => "latex",
        }
    }

    /// Full path of this format's directory
    pub fn dir_in(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.dir_name())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.dir_name())
    }
}
