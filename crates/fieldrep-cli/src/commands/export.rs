//! Export command
//!
//! Write visit reports for the signed-in representative.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use fieldrep_core::export::{ExportReport, FormatStatus, VisitExporter};
use fieldrep_core::guard::{FsSpaceProbe, ResourceGuard};
use fieldrep_core::types::{ExportFormat, ExportScope, Period};
use fieldrep_storage::{FileSession, FileSystemStore};

use super::Settings;

/// Exit code when the export ran but was not a full success
pub const EXIT_INCOMPLETE: i32 = 2;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Export every visit instead of one month
    #[arg(long, conflicts_with = "period")]
    pub all: bool,

    /// Month to export (defaults to the current month)
    #[arg(long, short, value_name = "YYYY-MM")]
    pub period: Option<Period>,

    /// Formats to write (defaults to the configured list)
    #[arg(long, short, value_delimiter = ',')]
    pub format: Vec<ExportFormat>,

    /// Directory to write artifacts to
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Print the export report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    pub fn scope(&self) -> ExportScope {
        if self.all {
            ExportScope::All
        } else {
            self.period
                .map(ExportScope::Period)
                .unwrap_or_else(ExportScope::current_period)
        }
    }
}

/// Build the exporter the way every command sees the data directory
pub fn build_exporter(
    settings: &Settings,
    formats: Vec<ExportFormat>,
    output_dir: PathBuf,
) -> Result<VisitExporter> {
    let store = FileSystemStore::new(&settings.data_dir).with_context(|| {
        format!("Failed to open data directory {}", settings.data_dir.display())
    })?;
    let session = FileSession::new(&settings.data_dir);

    Ok(VisitExporter::builder(Arc::new(store), Arc::new(session))
        .output_dir(output_dir)
        .guard(ResourceGuard::new(FsSpaceProbe, settings.config.export.min_free_bytes))
        .formats(formats)
        .build())
}

/// Execute the export command
pub fn execute(args: ExportArgs, settings: &Settings) -> Result<i32> {
    use colored::Colorize;

    settings
        .config
        .validate()
        .context("Invalid configuration")?;

    let formats = if args.format.is_empty() {
        settings.config.export.formats.clone()
    } else {
        args.format.clone()
    };
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| settings.output_dir());

    let exporter = build_exporter(settings, formats, output_dir)?;
    let scope = args.scope();

    if !args.json {
        eprintln!(
            "Exporting visits ({}) to {}...",
            scope.to_string().cyan(),
            exporter.output_dir().display()
        );
    }

    let report = exporter.export(scope);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_success() { 0 } else { EXIT_INCOMPLETE })
}

fn print_report(report: &ExportReport) {
    use colored::Colorize;

    if let Some(failure) = &report.aborted {
        eprintln!("{} Export aborted: {}", "✗".red(), failure);
        return;
    }

    for format in &report.formats {
        match &format.status {
            FormatStatus::Written { records, bytes, .. } => println!(
                "{} {:<5} {} ({} visits, {} bytes)",
                "✓".green(),
                format.format.to_string().bold(),
                format.path.display(),
                records,
                bytes
            ),
            FormatStatus::Failed { error } => println!(
                "{} {:<5} {}",
                "✗".red(),
                format.format.to_string().bold(),
                error
            ),
        }
    }

    if report.is_success() {
        eprintln!(
            "{} Exported {} visits for {}",
            "✓".green(),
            report.visit_count.to_string().yellow(),
            report.representative.as_deref().unwrap_or("").cyan()
        );
    } else {
        eprintln!(
            "{} {} of {} formats failed",
            "⚠".yellow(),
            report.failed_formats().len(),
            report.formats.len()
        );
    }
}
