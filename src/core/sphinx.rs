//! Sphinx step.
//!
//! Runs the site build (`make html` by default) inside the Sphinx source
//! directory. The Sphinx configuration there points Breathe at Doxygen's XML
//! output; that dependency is an ordering convention and is not checked here.

use tracing::{info, instrument};

use crate::adapters::{CommandRunner, Invocation};
use crate::config::ResolvedConfig;

use super::error::BuildError;
use super::workdir::WorkingDir;

/// Static site generation with Sphinx
pub struct SphinxStep<'a> {
    config: &'a ResolvedConfig,
}

impl<'a> SphinxStep<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self { config }
    }

    /// The command this step runs, e.g. `make html`
    pub fn invocation(&self) -> Invocation {
        Invocation::new(
            self.config.sphinx.program.clone(),
            [self.config.sphinx.target.clone()],
        )
    }

    #[instrument(skip(self, runner), fields(runner = runner.name()))]
    pub async fn run(&self, runner: &dyn CommandRunner) -> Result<(), BuildError> {
        let source_dir = &self.config.sphinx.source_dir;
        if !source_dir.is_dir() {
            return Err(BuildError::MissingInput {
                path: source_dir.clone(),
            });
        }

        let _cwd = WorkingDir::enter(source_dir)?;

        let invocation = self.invocation();
        info!(command = %invocation, dir = %source_dir.display(), "Running Sphinx");
        runner
            .run(&invocation)
            .await?
            .into_result(&invocation.program)?;

        Ok(())
    }
}
