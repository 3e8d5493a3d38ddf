//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod export;
pub mod visits;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fieldrep_core::config::Config;
use fieldrep_storage::default_data_dir;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent
const LOCAL_CONFIG: &str = "fieldrep.toml";

/// fieldrep - visit report export for field representatives
#[derive(Debug, Parser)]
#[command(name = "fieldrep")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding agenda.json and session.json
    #[arg(long, global = true, env = "FIELDREP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write visit reports for the signed-in representative
    Export(export::ExportArgs),

    /// List the visits an export would cover
    Visits(visits::VisitsArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Configuration and data location resolved from flags and files
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    /// File the configuration was read from, if any
    pub config_path: Option<PathBuf>,
    pub data_dir: PathBuf,
}

impl Settings {
    /// Resolve settings: explicit `--config`, else `./fieldrep.toml`, else
    /// defaults. `--data-dir` wins over `storage.data_dir`.
    pub fn load(config: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let config_path = match config {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(LOCAL_CONFIG)).filter(|p| p.exists()),
        };

        let config = match &config_path {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => Config::default(),
        };

        let data_dir = data_dir
            .map(Path::to_path_buf)
            .or_else(|| config.storage.data_dir.clone())
            .unwrap_or_else(default_data_dir);

        Ok(Self {
            config,
            config_path,
            data_dir,
        })
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.export.resolve_output_dir(&self.data_dir)
    }
}

/// Run the CLI application, returning the process exit code
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let settings = Settings::load(cli.config.as_deref(), cli.data_dir.as_deref())?;
    debug!(
        "Using data dir {:?}, output dir {:?}, config {:?}",
        settings.data_dir,
        settings.output_dir(),
        settings.config_path
    );

    // Dispatch to command handler
    match cli.command {
        Commands::Export(args) => export::execute(args, &settings),
        Commands::Visits(args) => visits::execute(args, &settings).map(|_| 0),
        Commands::Config(cmd) => config::execute(cmd, &settings).map(|_| 0),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
