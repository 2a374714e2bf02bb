//! Configuration for docbuild.
//!
//! Configuration sources (highest priority first):
//! 1. Explicit config file (`--config <FILE>`)
//! 2. `docbuild.yaml` at the repository root
//! 3. Defaults (`doxygen config`, then `make html` in `docs/sphinx`)
//!
//! Relative paths in the config file are resolved against the repository root,
//! which is the directory Doxygen's own configuration is written against.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::OutputFormat;

/// File name looked up at the repository root
pub const CONFIG_FILE_NAME: &str = "docbuild.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub doxygen: DoxygenConfig,
    #[serde(default)]
    pub sphinx: SphinxConfig,
    /// Per-tool timeout; absent means wait forever
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoxygenConfig {
    pub program: Option<String>,
    /// Doxygen configuration file (relative to root)
    pub config: Option<String>,
    /// Directory Doxygen writes its xml/html/latex output to (relative to root)
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SphinxConfig {
    pub program: Option<String>,
    /// Sphinx source directory holding the Makefile (relative to root)
    pub source_dir: Option<String>,
    /// Build target passed to the program
    pub target: Option<String>,
}

/// Resolved Doxygen settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoxygenSettings {
    pub program: String,
    pub config_file: PathBuf,
    pub output_dir: PathBuf,
}

/// Resolved Sphinx settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SphinxSettings {
    pub program: String,
    pub source_dir: PathBuf,
    pub target: String,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// Absolute path to the repository root
    pub root: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    pub doxygen: DoxygenSettings,
    pub sphinx: SphinxSettings,
    pub timeout_seconds: Option<u64>,
}

impl ResolvedConfig {
    /// Default layout under `root`
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self::from_file(root.into(), None, ConfigFile::default())
    }

    fn from_file(root: PathBuf, config_file: Option<PathBuf>, file: ConfigFile) -> Self {
        let doxygen = DoxygenSettings {
            program: file.doxygen.program.unwrap_or_else(|| "doxygen".to_string()),
            config_file: resolve_path(&root, file.doxygen.config.as_deref().unwrap_or("config")),
            output_dir: resolve_path(&root, file.doxygen.output_dir.as_deref().unwrap_or("docs")),
        };

        let sphinx = SphinxSettings {
            program: file.sphinx.program.unwrap_or_else(|| "make".to_string()),
            source_dir: resolve_path(
                &root,
                file.sphinx.source_dir.as_deref().unwrap_or("docs/sphinx"),
            ),
            target: file.sphinx.target.unwrap_or_else(|| "html".to_string()),
        };

        Self {
            root,
            config_file,
            doxygen,
            sphinx,
            timeout_seconds: file.timeout_seconds,
        }
    }

    /// Directory of a given Doxygen output format
    pub fn output_dir(&self, format: OutputFormat) -> PathBuf {
        format.dir_in(&self.doxygen.output_dir)
    }

    /// Per-tool timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse config file content
pub fn parse_config(content: &str) -> Result<ConfigFile> {
    // An empty file is a valid "all defaults" config
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Resolve a path that may be relative to the repository root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Load configuration for the repository at `root`.
///
/// `explicit` must exist when given; otherwise `docbuild.yaml` at the root is
/// used if present.
pub fn load(root: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Repository root not found: {}", root.display()))?;

    let config_file = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let candidate = root.join(CONFIG_FILE_NAME);
            candidate.is_file().then_some(candidate)
        }
    };

    let file = match config_file {
        Some(ref path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };

    Ok(ResolvedConfig::from_file(root, config_file, file))
}
