//! Core type definitions for fieldrep

use crate::error::{FieldRepError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month used to bound a visit selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(FieldRepError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(1..=9999).contains(&year) {
            return Err(FieldRepError::InvalidPeriod(format!(
                "year must have four digits, got {}",
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    /// The month containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Check whether a date falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = FieldRepError;

    /// Parse `YYYY-MM`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FieldRepError::InvalidPeriod(format!("expected YYYY-MM, got '{}'", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Outcome recorded for a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitStatus {
    /// Visit took place
    #[serde(alias = "done", alias = "Egina")]
    Done,
    /// Visit still to happen
    #[serde(alias = "pending", alias = "Zain")]
    Pending,
    /// Visit called off
    #[serde(alias = "cancelled", alias = "Deuseztatua")]
    Cancelled,
}

impl VisitStatus {
    /// Label written into export artifacts
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Done => "Done",
            VisitStatus::Pending => "Pending",
            VisitStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitStatus {
    type Err = FieldRepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "done" | "egina" => Ok(VisitStatus::Done),
            "pending" | "zain" => Ok(VisitStatus::Pending),
            "cancelled" | "canceled" | "deuseztatua" => Ok(VisitStatus::Cancelled),
            other => Err(FieldRepError::Validation(format!(
                "Unknown visit status: {}",
                other
            ))),
        }
    }
}

/// Which visits an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "period", rename_all = "snake_case")]
pub enum ExportScope {
    /// Every visit of the representative
    All,
    /// Visits dated inside one month
    Period(Period),
}

impl ExportScope {
    /// Scope for the month containing today
    pub fn current_period() -> Self {
        ExportScope::Period(Period::current())
    }

    /// Period filter handed to the selector
    pub fn period(&self) -> Option<Period> {
        match self {
            ExportScope::All => None,
            ExportScope::Period(p) => Some(*p),
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportScope::All => f.write_str("all"),
            ExportScope::Period(p) => write!(f, "{}", p),
        }
    }
}

/// Artifact formats produced by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Hierarchical XML document
    Xml,
    /// One `Key: value | ...` line per visit
    Text,
    /// Spreadsheet-friendly comma separated table
    Csv,
}

impl ExportFormat {
    /// All formats, in the order they are written
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Xml, ExportFormat::Text, ExportFormat::Csv];

    /// Short name used in config and CLI
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Xml => "xml",
            ExportFormat::Text => "text",
            ExportFormat::Csv => "csv",
        }
    }

    /// Fixed artifact file name
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Xml => "agenda.xml",
            ExportFormat::Text => "agenda.txt",
            ExportFormat::Csv => "agenda.csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = FieldRepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "xml" => Ok(ExportFormat::Xml),
            "text" | "txt" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(FieldRepError::Validation(format!(
                "Unknown export format: {}",
                other
            ))),
        }
    }
}
