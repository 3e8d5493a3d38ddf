//! Export outcome reporting

use crate::types::{ExportFormat, ExportScope};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Why an export stage or a single format failed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExportFailure {
    /// Destination has less free space than required
    #[error("not enough free space: {available} bytes available, {required} required")]
    InsufficientSpace { available: u64, required: u64 },

    /// Destination directory cannot be created or inspected
    #[error("export destination {path:?} is unavailable: {message}")]
    DestinationUnavailable { path: PathBuf, message: String },

    /// Nobody is signed in
    #[error("no active session")]
    NoSession,

    /// Writing an artifact failed
    #[error("failed to write {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    /// Any other failure during selection or serialization
    #[error("unexpected failure: {message}")]
    Unexpected { message: String },
}

impl ExportFailure {
    /// Stage the failure belongs to
    pub fn stage(&self) -> &'static str {
        match self {
            ExportFailure::InsufficientSpace { .. }
            | ExportFailure::DestinationUnavailable { .. } => "resource",
            ExportFailure::NoSession => "session",
            ExportFailure::Io { .. } => "io",
            ExportFailure::Unexpected { .. } => "unexpected",
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ExportFailure::Unexpected {
            message: message.into(),
        }
    }
}

/// Result of producing one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormatStatus {
    /// Artifact replaced on disk
    Written {
        records: usize,
        bytes: u64,
        /// BLAKE3 hex digest of the artifact
        digest: String,
    },
    /// Artifact left untouched
    Failed { error: ExportFailure },
}

/// Outcome for one requested format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub status: FormatStatus,
}

impl FormatReport {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FormatStatus::Written { .. })
    }

    pub fn failure(&self) -> Option<&ExportFailure> {
        match &self.status {
            FormatStatus::Failed { error } => Some(error),
            FormatStatus::Written { .. } => None,
        }
    }
}

/// Outcome of one export invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Requested scope; None when the requested period was invalid
    pub scope: Option<ExportScope>,
    /// Representative the export was scoped to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative: Option<String>,
    pub visit_count: usize,
    /// Failure that stopped the export before any artifact was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<ExportFailure>,
    pub formats: Vec<FormatReport>,
}

impl ExportReport {
    pub fn new(scope: Option<ExportScope>) -> Self {
        Self {
            scope,
            representative: None,
            visit_count: 0,
            aborted: None,
            formats: Vec::new(),
        }
    }

    /// Mark the export as stopped before serialization
    pub fn abort(mut self, failure: ExportFailure) -> Self {
        self.aborted = Some(failure);
        self
    }

    /// True when nothing aborted and every requested format was written
    pub fn is_success(&self) -> bool {
        self.aborted.is_none() && self.formats.iter().all(FormatReport::is_success)
    }

    /// Report for a single format, if it was requested
    pub fn format(&self, format: ExportFormat) -> Option<&FormatReport> {
        self.formats.iter().find(|r| r.format == format)
    }

    /// Formats that failed
    pub fn failed_formats(&self) -> Vec<ExportFormat> {
        self.formats
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| r.format)
            .collect()
    }
}
