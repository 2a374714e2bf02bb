//! Build report.
//!
//! A BuildReport records one execution of the documentation build: which
//! steps ran, how long they took, and how the build ended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two external steps of a build, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Source documentation extraction
    Doxygen,

    /// Static site generation
    Sphinx,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Doxygen => "doxygen",
            Self::Sphinx => "sphinx",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Outcome of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub step: StepKind,

    /// Wall-clock time spent in the step
    pub duration_ms: u64,

    /// Error message if the step failed
    pub error: Option<String>,
}

/// Final state of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildState {
    Running,
    Succeeded,
    Failed,
}

/// Record of a single build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    /// Unique identifier for this build (used in log spans)
    pub id: Uuid,

    /// When the build started
    pub started_at: DateTime<Utc>,

    /// When the build finished (if applicable)
    pub completed_at: Option<DateTime<Utc>>,

    pub state: BuildState,

    /// Steps that were attempted, in order
    pub steps: Vec<StepReport>,
}

impl Default for BuildReport {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildReport {
    /// Start a new report
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            completed_at: None,
            state: BuildState::Running,
            steps: Vec::new(),
        }
    }

    /// Record a step that finished successfully
    pub fn record_success(&mut self, step: StepKind, duration_ms: u64) {
        self.steps.push(StepReport {
            step,
            duration_ms,
            error: None,
        });
    }

    /// Record a failed step and mark the build as failed
    pub fn record_failure(&mut self, step: StepKind, duration_ms: u64, error: String) {
        self.steps.push(StepReport {
            step,
            duration_ms,
            error: Some(error),
        });
        self.fail();
    }

    /// Mark the build as failed without attributing it to a step
    pub fn fail(&mut self) {
        self.finish(BuildState::Failed);
    }

    /// Mark the build as succeeded
    pub fn complete(&mut self) {
        self.finish(BuildState::Succeeded);
    }

    fn finish(&mut self, state: BuildState) {
        self.state = state;
        self.completed_at = Some(Utc::now());
    }

    /// Steps in the order they ran
    pub fn step_order(&self) -> Vec<StepKind> {
        self.steps.iter().map(|s| s.step).collect()
    }

    /// Total time spent in steps
    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.duration_ms).sum()
    }

    /// Multi-line human-readable summary, one line per step
    pub fn summary(&self) -> String {
        let state = match self.state {
            BuildState::Running => "running",
            BuildState::Succeeded => "succeeded",
            BuildState::Failed => "failed",
        };

        let mut out = format!(
            "Build {} {} in {}ms\n",
            self.id,
            state,
            self.total_duration_ms()
        );
        for step in &self.steps {
            let outcome = match step.error {
                Some(ref error) => format!("FAILED: {}", error),
                None => "ok".to_string(),
            };
            out.push_str(&format!("  {:<8} {}ms  {}\n", step.step, step.duration_ms, outcome));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_build() {
        let mut report = BuildReport::new();
        assert_eq!(report.state, BuildState::Running);

        report.record_success(StepKind::Doxygen, 120);
        report.record_success(StepKind::Sphinx, 80);
        report.complete();

        assert_eq!(report.state, BuildState::Succeeded);
        assert_eq!(report.step_order(), vec![StepKind::Doxygen, StepKind::Sphinx]);
        assert_eq!(report.total_duration_ms(), 200);
        assert!(report.completed_at.is_some());
    }

    #[test]
    fn test_failure_marks_build_failed() {
        let mut report = BuildReport::new();
        report.record_failure(StepKind::Doxygen, 5, "'doxygen' exited with code 1".into());

        assert_eq!(report.state, BuildState::Failed);
        assert_eq!(report.steps[0].error.as_deref(), Some("'doxygen' exited with code 1"));
    }

    #[test]
    fn test_summary_lists_steps_and_state() {
        let mut report = BuildReport::new();
        report.record_success(StepKind::Doxygen, 12);
        report.record_failure(StepKind::Sphinx, 3, "'make' exited with code 2".into());

        let summary = report.summary();
        assert!(summary.starts_with(&format!("Build {} failed in 15ms", report.id)));
        assert!(summary.contains("doxygen  12ms  ok"));
        assert!(summary.contains("sphinx   3ms  FAILED: 'make' exited with code 2"));
    }

    #[test]
    fn test_fail_without_step() {
        let mut report = BuildReport::new();
        report.fail();

        assert_eq!(report.state, BuildState::Failed);
        assert!(report.steps.is_empty());
        assert!(report.completed_at.is_some());
    }

    #[test]
    fn test_report_serialization() {
        let mut report = BuildReport::new();
        report.record_success(StepKind::Sphinx, 10);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"step\":\"sphinx\""));

        let parsed: BuildReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, report.id);
        assert_eq!(parsed.step_order(), vec![StepKind::Sphinx]);
    }
}
