//! Shared test helpers: a recording command runner and repository fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use docbuild::config;
use docbuild::{CommandRunner, ExitOutcome, Invocation, OutputFormat, ResolvedConfig, ToolError};
use tempfile::TempDir;

/// Serializes tests that change the process working directory
static CWD_LOCK: Mutex<()> = Mutex::new(());

pub fn cwd_lock() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One recorded command
#[derive(Debug, Clone)]
pub struct Call {
    pub invocation: Invocation,
    /// Working directory at the time of the call
    pub cwd: PathBuf,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    exit_codes: HashMap<String, i32>,
    emulate_doxygen: bool,
}

/// Command runner that records calls instead of spawning processes.
///
/// Clones share the same record, so a test can keep a handle after moving
/// one into the orchestrator.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    state: Arc<Mutex<State>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` exit with `code`
    pub fn failing(self, program: &str, code: i32) -> Self {
        self.lock().exit_codes.insert(program.to_string(), code);
        self
    }

    /// Create docs/{xml,html,latex} under the working directory whenever
    /// `doxygen` succeeds, the way the real tool would
    pub fn emulating_doxygen(self) -> Self {
        self.lock().emulate_doxygen = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.invocation.program).collect()
    }

    pub fn count(&self, program: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.invocation.program == program)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    fn name(&self) -> &str {
        "recording"
    }

    async fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, ToolError> {
        let cwd = std::env::current_dir().expect("current dir");
        let mut state = self.lock();
        state.calls.push(Call {
            invocation: invocation.clone(),
            cwd: cwd.clone(),
        });

        let code = state.exit_codes.get(&invocation.program).copied().unwrap_or(0);

        if code == 0 && state.emulate_doxygen && invocation.program == "doxygen" {
            for format in OutputFormat::ALL {
                let dir = format.dir_in(&cwd.join("docs"));
                std::fs::create_dir_all(&dir).expect("create output dir");
                std::fs::write(dir.join("index"), format.dir_name()).expect("write output");
            }
        }

        Ok(ExitOutcome::code(code))
    }
}

/// A repository with the inputs both tools expect: `config` and `docs/sphinx`
pub fn fixture_repo() -> TempDir {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("config"), "GENERATE_XML = YES\n").expect("write config");
    std::fs::create_dir_all(temp.path().join("docs/sphinx")).expect("create sphinx dir");
    std::fs::write(temp.path().join("docs/sphinx/Makefile"), "html:\n").expect("write Makefile");
    temp
}

/// Resolved configuration for a fixture repository
pub fn config_for(repo: &Path) -> ResolvedConfig {
    config::load(repo, None).expect("load config")
}

/// Create every Doxygen output directory, as a previous run would have
pub fn seed_outputs(config: &ResolvedConfig) {
    for format in OutputFormat::ALL {
        std::fs::create_dir_all(config.output_dir(format)).expect("create output dir");
    }
}
