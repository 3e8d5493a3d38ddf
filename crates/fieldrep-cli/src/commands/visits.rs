//! Visits command
//!
//! List the visits an export would cover, with resolved party names.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use fieldrep_core::names::NameResolver;
use fieldrep_core::types::{ExportScope, Period};
use fieldrep_core::visit::VisitRecord;

use super::export::build_exporter;
use super::Settings;

/// Arguments for the visits command
#[derive(Debug, Args)]
pub struct VisitsArgs {
    /// List every visit instead of one month
    #[arg(long, conflicts_with = "period")]
    pub all: bool,

    /// Month to list (defaults to the current month)
    #[arg(long, short, value_name = "YYYY-MM")]
    pub period: Option<Period>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// One listed visit
#[derive(Debug, Serialize)]
struct VisitRow {
    id: i64,
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    party_code: Option<String>,
    party: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl VisitRow {
    fn new(visit: &VisitRecord, names: &NameResolver<'_>) -> Self {
        Self {
            id: visit.id,
            date: visit.date_text(),
            time: visit.time_of_day(),
            party_code: visit.party_code.clone(),
            party: visit
                .party_code
                .as_deref()
                .map(|code| names.resolve_party_name(code))
                .unwrap_or_default(),
            status: visit.status.map(|s| s.to_string()),
            description: visit.description.clone(),
        }
    }
}

/// Execute the visits command
pub fn execute(args: VisitsArgs, settings: &Settings) -> Result<()> {
    use colored::Colorize;

    let scope = if args.all {
        ExportScope::All
    } else {
        args.period
            .map(ExportScope::Period)
            .unwrap_or_else(ExportScope::current_period)
    };

    let exporter = build_exporter(
        settings,
        settings.config.export.formats.clone(),
        settings.output_dir(),
    )?;
    let visits = exporter
        .select(scope)
        .with_context(|| format!("Failed to select visits ({})", scope))?;

    let names = NameResolver::new(exporter.store());
    let rows: Vec<VisitRow> = visits.iter().map(|v| VisitRow::new(v, &names)).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No visits ({}).", scope);
        return Ok(());
    }

    println!("{}", format!("Visits ({})", scope).bold().underline());
    for row in &rows {
        println!(
            "{:>6}  {} {:<5}  {:<24} {:<10} {}",
            row.id.to_string().dimmed(),
            row.date,
            row.time.as_deref().unwrap_or(""),
            row.party.cyan(),
            row.status.as_deref().unwrap_or("-"),
            row.description.as_deref().unwrap_or("").trim()
        );
    }
    println!();
    println!("{} visits", rows.len().to_string().yellow());

    Ok(())
}
