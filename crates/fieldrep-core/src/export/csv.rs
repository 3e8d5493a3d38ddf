//! CSV exporter for visits

use super::exporter::Exporter;
use crate::error::Result;
use crate::names::NameResolver;
use crate::types::ExportFormat;
use crate::visit::VisitRecord;
use std::borrow::Cow;

/// Byte-order mark so spreadsheets detect UTF-8
pub const BOM: char = '\u{feff}';

/// Header row naming the six columns
pub const HEADER: &str = "Date,Time,Representative,Party,Description,Status";

/// Comma separated table with resolved display names.
///
/// The description column is always quoted. Other columns are quoted only
/// when they contain a delimiter, a quote or a line break. Embedded quotes
/// are doubled.
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    fn render_row(&self, visit: &VisitRecord, names: &NameResolver<'_>) -> String {
        let representative = visit
            .representative_code
            .as_deref()
            .map(|code| names.resolve_representative_name(code))
            .unwrap_or_default();
        let party = visit
            .party_code
            .as_deref()
            .map(|code| names.resolve_party_name(code))
            .unwrap_or_default();
        let date = visit.date_text();
        let time = visit.time_of_day().unwrap_or_default();
        let description = visit.description.as_deref().unwrap_or("");
        let status = visit.status.map(|s| s.as_str()).unwrap_or("");

        [
            field(&date),
            field(&time),
            field(&representative),
            field(&party),
            Cow::Owned(quote(description)),
            field(status),
        ]
        .join(",")
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for CsvExporter {
    fn export(&self, visits: &[VisitRecord], names: &NameResolver<'_>) -> Result<String> {
        let mut output = String::new();
        output.push(BOM);
        output.push_str(HEADER);
        output.push('\n');
        for visit in visits {
            output.push_str(&self.render_row(visit, names));
            output.push('\n');
        }
        Ok(output)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }
}

/// Quote a field only when it needs it.
///
/// Rows are assembled by hand rather than through a `csv::Writer` because
/// the description column is quoted unconditionally, which the writer's
/// quoting styles cannot express per column.
fn field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\r', '\n']) {
        Cow::Owned(quote(value))
    } else {
        Cow::Borrowed(value)
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
