//! Main orchestrator for the documentation build.
//!
//! Runs Doxygen, then Sphinx, strictly in that order. The first failure
//! aborts the build; there are no retries.

use std::time::Instant;

use tracing::{error, info, instrument};

use crate::adapters::{CommandRunner, ProcessRunner};
use crate::config::ResolvedConfig;
use crate::domain::{BuildReport, BuildState, StepKind};

use super::doxygen::DoxygenStep;
use super::error::BuildError;
use super::sphinx::SphinxStep;
use super::workdir::WorkingDir;

/// Documentation build orchestrator
pub struct Orchestrator {
    config: ResolvedConfig,

    /// Runner used for every external command
    runner: Box<dyn CommandRunner>,
}

impl Orchestrator {
    /// Create an orchestrator that spawns real processes
    pub fn new(config: ResolvedConfig) -> Self {
        let runner = match config.timeout() {
            Some(limit) => ProcessRunner::with_timeout(limit),
            None => ProcessRunner::new(),
        };
        Self::with_runner(config, runner)
    }

    /// Create an orchestrator with a custom command runner
    pub fn with_runner(config: ResolvedConfig, runner: impl CommandRunner + 'static) -> Self {
        Self {
            config,
            runner: Box::new(runner),
        }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Run only the Doxygen step
    pub async fn run_doxygen(&self, only_xml: bool) -> Result<(), BuildError> {
        DoxygenStep::new(&self.config)
            .run(self.runner.as_ref(), only_xml)
            .await
    }

    /// Run only the Sphinx step
    pub async fn run_sphinx(&self) -> Result<(), BuildError> {
        SphinxStep::new(&self.config).run(self.runner.as_ref()).await
    }

    /// Run the full build: Doxygen, then Sphinx.
    ///
    /// The process sits in the repository root between steps and is returned
    /// to its original directory when the build ends, successfully or not.
    pub async fn build(&self, only_xml: bool) -> Result<BuildReport, BuildError> {
        let (report, result) = self.build_with_report(only_xml).await;
        result.map(|()| report)
    }

    /// Run the full build and return its report whether or not it succeeded.
    ///
    /// On failure the report is in the `Failed` state and the error is the one
    /// that stopped the build.
    #[instrument(skip(self), fields(root = %self.config.root.display()))]
    pub async fn build_with_report(&self, only_xml: bool) -> (BuildReport, Result<(), BuildError>) {
        let mut report = BuildReport::new();
        info!(build_id = %report.id, "Starting documentation build");

        let result = self.run_steps(&mut report, only_xml).await;

        match result {
            Ok(()) => {
                report.complete();
                info!(
                    build_id = %report.id,
                    total_ms = report.total_duration_ms(),
                    "Documentation build completed"
                );
            }
            Err(ref e) => {
                if report.state != BuildState::Failed {
                    report.fail();
                }
                error!(
                    build_id = %report.id,
                    total_ms = report.total_duration_ms(),
                    error = %e,
                    "Documentation build failed"
                );
            }
        }

        (report, result)
    }

    async fn run_steps(&self, report: &mut BuildReport, only_xml: bool) -> Result<(), BuildError> {
        let _cwd = WorkingDir::enter(&self.config.root)?;

        for step in [StepKind::Doxygen, StepKind::Sphinx] {
            let step_start = Instant::now();

            let result = match step {
                StepKind::Doxygen => self.run_doxygen(only_xml).await,
                StepKind::Sphinx => self.run_sphinx().await,
            };

            let duration_ms = step_start.elapsed().as_millis() as u64;

            match result {
                Ok(()) => {
                    info!(%step, duration_ms, "Step completed");
                    report.record_success(step, duration_ms);
                }
                Err(e) => {
                    error!(%step, duration_ms, error = %e, "Step failed");
                    report.record_failure(step, duration_ms, e.to_string());
                    return Err(e);
                }
            }
        }

        Ok(())
    }
}
