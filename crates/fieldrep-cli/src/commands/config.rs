//! Config command
//!
//! Inspect fieldrep configuration.

use anyhow::{Context, Result};
use clap::Subcommand;

use super::Settings;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, settings: &Settings) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(settings, json),
        ConfigCommand::Validate => validate_config(settings),
    }
}

fn source_label(settings: &Settings) -> String {
    settings
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string())
}

fn show_config(settings: &Settings, as_json: bool) -> Result<()> {
    use colored::Colorize;

    if as_json {
        let json = serde_json::json!({
            "source": settings.config_path,
            "data_dir": settings.data_dir,
            "output_dir": settings.output_dir(),
            "config": settings.config,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    println!("{}", source_label(settings).dimmed());
    println!();
    println!("{:<12} {}", "data dir".cyan(), settings.data_dir.display());
    println!("{:<12} {}", "output dir".cyan(), settings.output_dir().display());
    println!();
    println!("{}", settings.config.to_toml_string()?);

    Ok(())
}

fn validate_config(settings: &Settings) -> Result<()> {
    use colored::Colorize;

    settings
        .config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", source_label(settings)))?;

    println!(
        "{} Configuration is valid ({})",
        "✓".green(),
        source_label(settings)
    );
    Ok(())
}
