//! Scoped working-directory changes.
//!
//! The current directory is process-wide state. [`WorkingDir`] changes it and
//! puts the previous directory back when dropped, so a failing tool never
//! leaves the process somewhere unexpected.

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::BuildError;

/// Guard that restores the previous working directory on drop.
///
/// Guards nest: dropping them in reverse order of creation walks back through
/// every directory entered.
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct WorkingDir {
    previous: PathBuf,
    current: PathBuf,
}

impl WorkingDir {
    /// Change into `path`, remembering the current directory
    pub fn enter(path: &Path) -> Result<Self, BuildError> {
        let previous = env::current_dir().map_err(|source| BuildError::WorkingDir {
            path: path.to_path_buf(),
            source,
        })?;

        env::set_current_dir(path).map_err(|source| BuildError::WorkingDir {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(from = %previous.display(), to = %path.display(), "Entered directory");

        Ok(Self {
            previous,
            current: path.to_path_buf(),
        })
    }

    /// Directory this guard entered
    pub fn path(&self) -> &Path {
        &self.current
    }

    /// Directory restored on drop
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            warn!(
                path = %self.previous.display(),
                error = %e,
                "Failed to restore working directory"
            );
        }
    }
}
