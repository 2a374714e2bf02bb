//! Doxygen step.
//!
//! Runs Doxygen from the repository root (its configuration file uses
//! root-relative paths) and optionally discards every output format except
//! XML, which is what Breathe reads from the Sphinx side.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::adapters::{CommandRunner, Invocation};
use crate::config::ResolvedConfig;
use crate::domain::OutputFormat;

use super::error::BuildError;
use super::workdir::WorkingDir;

/// Source documentation extraction with Doxygen
pub struct DoxygenStep<'a> {
    config: &'a ResolvedConfig,
}

impl<'a> DoxygenStep<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self { config }
    }

    /// The command this step runs, e.g. `doxygen config`
    pub fn invocation(&self) -> Invocation {
        Invocation::new(
            self.config.doxygen.program.clone(),
            [display_from_root(&self.config.root, &self.config.doxygen.config_file)],
        )
    }

    /// Run Doxygen, then delete the html and latex output when `only_xml` is set.
    ///
    /// The working directory is the repository root while Doxygen runs and is
    /// restored afterwards on every path.
    #[instrument(skip(self, runner), fields(runner = runner.name()))]
    pub async fn run(&self, runner: &dyn CommandRunner, only_xml: bool) -> Result<(), BuildError> {
        let config_file = &self.config.doxygen.config_file;
        if !config_file.is_file() {
            return Err(BuildError::MissingInput {
                path: config_file.clone(),
            });
        }

        let _cwd = WorkingDir::enter(&self.config.root)?;

        let invocation = self.invocation();
        info!(command = %invocation, "Running Doxygen");
        runner
            .run(&invocation)
            .await?
            .into_result(&invocation.program)?;

        if only_xml {
            self.discard_non_xml().await?;
        }

        Ok(())
    }

    /// Notice printed before the html and latex output is deleted
    pub fn cleanup_notice(&self) -> String {
        let root = &self.config.root;
        format!(
            "Deleting {} and {} keeping only {}",
            display_from_root(root, &self.config.output_dir(OutputFormat::Html)),
            display_from_root(root, &self.config.output_dir(OutputFormat::Latex)),
            display_from_root(root, &self.config.output_dir(OutputFormat::Xml)),
        )
    }

    /// Delete the html and latex output, keeping xml.
    ///
    /// Whatever sits at those paths goes: directories, plain files and
    /// symlinks (the link itself, never its target). Idempotent: missing
    /// paths are skipped.
    pub async fn discard_non_xml(&self) -> Result<(), BuildError> {
        // Printed regardless of the log filter
        println!("{}", self.cleanup_notice());

        for format in OutputFormat::DISCARDABLE {
            remove_if_present(&self.config.output_dir(format)).await?;
        }

        Ok(())
    }
}

async fn remove_if_present(path: &Path) -> Result<(), BuildError> {
    let cleanup_error = |source| BuildError::Cleanup {
        path: path.to_path_buf(),
        source,
    };

    let metadata = match tokio::fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(cleanup_error(e)),
    };

    let removed = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };

    match removed {
        Ok(()) => {
            debug!(path = %path.display(), "Removed doxygen output");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(cleanup_error(e)),
    }
}

/// Render `path` relative to `root` when it lives underneath it
fn display_from_root(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_default_invocation_is_root_relative() {
        let config = ResolvedConfig::with_defaults("/repo");
        let step = DoxygenStep::new(&config);

        assert_eq!(step.invocation(), Invocation::new("doxygen", ["config"]));
    }

    #[test]
    fn test_display_outside_root_stays_absolute() {
        assert_eq!(
            display_from_root(Path::new("/repo"), Path::new("/elsewhere/Doxyfile")),
            "/elsewhere/Doxyfile"
        );
        assert_eq!(
            display_from_root(Path::new("/repo"), &PathBuf::from("/repo/docs/html")),
            "docs/html"
        );
    }

    #[tokio::test]
    async fn test_discard_keeps_xml() {
        let temp = TempDir::new().unwrap();
        let config = ResolvedConfig::with_defaults(temp.path());
        for format in OutputFormat::ALL {
            std::fs::create_dir_all(config.output_dir(format)).unwrap();
        }
        std::fs::write(config.output_dir(OutputFormat::Xml).join("index.xml"), "<doxygen/>").unwrap();

        DoxygenStep::new(&config).discard_non_xml().await.unwrap();

        assert!(!config.output_dir(OutputFormat::Html).exists());
        assert!(!config.output_dir(OutputFormat::Latex).exists());
        assert!(config.output_dir(OutputFormat::Xml).join("index.xml").exists());
    }

    #[test]
    fn test_cleanup_notice() {
        let config = ResolvedConfig::with_defaults("/repo");
        assert_eq!(
            DoxygenStep::new(&config).cleanup_notice(),
            "Deleting docs/html and docs/latex keeping only docs/xml"
        );
    }

    #[tokio::test]
    async fn test_discard_removes_plain_files() {
        let temp = TempDir::new().unwrap();
        let config = ResolvedConfig::with_defaults(temp.path());
        std::fs::create_dir_all(&config.doxygen.output_dir).unwrap();
        std::fs::write(config.output_dir(OutputFormat::Html), "stale").unwrap();
        std::fs::write(config.output_dir(OutputFormat::Latex), "stale").unwrap();

        DoxygenStep::new(&config).discard_non_xml().await.unwrap();

        assert!(!config.output_dir(OutputFormat::Html).exists());
        assert!(!config.output_dir(OutputFormat::Latex).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_discard_removes_symlinks_but_not_targets() {
        let temp = TempDir::new().unwrap();
        let config = ResolvedConfig::with_defaults(temp.path());
        std::fs::create_dir_all(&config.doxygen.output_dir).unwrap();

        let target_dir = temp.path().join("elsewhere");
        std::fs::create_dir_all(&target_dir).unwrap();
        std::fs::write(target_dir.join("keep.txt"), "keep").unwrap();
        let target_file = temp.path().join("notes.txt");
        std::fs::write(&target_file, "keep").unwrap();

        let html = config.output_dir(OutputFormat::Html);
        let latex = config.output_dir(OutputFormat::Latex);
        std::os::unix::fs::symlink(&target_dir, &html).unwrap();
        std::os::unix::fs::symlink(&target_file, &latex).unwrap();

        DoxygenStep::new(&config).discard_non_xml().await.unwrap();

        assert!(std::fs::symlink_metadata(&html).is_err());
        assert!(std::fs::symlink_metadata(&latex).is_err());
        assert!(target_dir.join("keep.txt").exists());
        assert!(target_file.exists());
    }

    #[tokio::test]
    async fn test_discard_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config = ResolvedConfig::with_defaults(temp.path());
        let step = DoxygenStep::new(&config);

        // Nothing exists yet
        step.discard_non_xml().await.unwrap();
        step.discard_non_xml().await.unwrap();

        assert!(!config.output_dir(OutputFormat::Html).exists());
        assert!(!config.output_dir(OutputFormat::Latex).exists());
    }
}
