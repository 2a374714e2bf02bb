//! Command-line interface for docbuild.
//!
//! With no subcommand the full build runs: Doxygen keeping every output
//! format, then Sphinx. The subcommands expose each step on its own.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{self, ResolvedConfig};
use crate::core::Orchestrator;
use crate::domain::OutputFormat;

/// docbuild - Build the project documentation (Doxygen, then Sphinx)
#[derive(Parser, Debug)]
#[command(name = "docbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Repository root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Path to a docbuild.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run Doxygen, then Sphinx (the default)
    Build {
        /// Delete the html and latex Doxygen output, keeping only xml
        #[arg(long)]
        only_xml: bool,
    },

    /// Run Doxygen only; keeps just the xml output unless --keep-all is given
    Doxygen {
        /// Keep the html and latex output as well
        #[arg(long)]
        keep_all: bool,
    },

    /// Run Sphinx only (expects Doxygen xml output to exist)
    Sphinx,

    /// Show resolved configuration
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// What a parsed command line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Build { only_xml: bool },
    Doxygen { only_xml: bool },
    Sphinx,
    ShowConfig { json: bool },
}

impl Cli {
    /// Resolve the requested action; no subcommand means a full build
    pub fn action(&self) -> Action {
        match self.command {
            None => Action::Build { only_xml: false },
            Some(Commands::Build { only_xml }) => Action::Build { only_xml },
            Some(Commands::Doxygen { keep_all }) => Action::Doxygen {
                only_xml: !keep_all,
            },
            Some(Commands::Sphinx) => Action::Sphinx,
            Some(Commands::Config { json }) => Action::ShowConfig { json },
        }
    }

    /// Load configuration for the selected repository root
    pub fn load_config(&self) -> Result<ResolvedConfig> {
        let root = match self.root {
            Some(ref root) => root.clone(),
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        config::load(&root, self.config.as_deref())
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = self.load_config()?;
        let orchestrator = Orchestrator::new(config);
        dispatch(&orchestrator, self.action()).await
    }
}

/// Carry out an action with the given orchestrator
pub async fn dispatch(orchestrator: &Orchestrator, action: Action) -> Result<()> {
    match action {
        Action::Build { only_xml } => {
            let (report, result) = orchestrator.build_with_report(only_xml).await;
            print!("{}", report.summary());
            result?;
        }
        Action::Doxygen { only_xml } => {
            orchestrator.run_doxygen(only_xml).await?;
        }
        Action::Sphinx => {
            orchestrator.run_sphinx().await?;
        }
        Action::ShowConfig { json } => {
            show_config(orchestrator.config(), json)?;
        }
    }
    Ok(())
}

fn show_config(cfg: &ResolvedConfig, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(cfg).context("Failed to serialize configuration")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("docbuild configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Root:        {}", cfg.root.display());
    println!();
    println!("Doxygen:");
    println!("  Program:     {}", cfg.doxygen.program);
    println!("  Config file: {}", cfg.doxygen.config_file.display());
    for format in OutputFormat::ALL {
        println!("  Output ({:<5}) {}", format, cfg.output_dir(format).display());
    }
    println!();
    println!("Sphinx:");
    println!("  Program:    {}", cfg.sphinx.program);
    println!("  Target:     {}", cfg.sphinx.target);
    println!("  Source dir: {}", cfg.sphinx.source_dir.display());
    println!();
    match cfg.timeout_seconds {
        Some(secs) => println!("Timeout: {}s per tool", secs),
        None => println!("Timeout: none"),
    }

    Ok(())
}
