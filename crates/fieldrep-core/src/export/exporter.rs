//! Exporter trait and manager

use crate::error::{FieldRepError, Result};
use crate::names::NameResolver;
use crate::types::ExportFormat;
use crate::visit::VisitRecord;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Trait for visit exporters
pub trait Exporter: Send + Sync {
    /// Render the visits as one complete artifact
    fn export(&self, visits: &[VisitRecord], names: &NameResolver<'_>) -> Result<String>;

    /// Get the format produced
    fn format(&self) -> ExportFormat;

    /// Get the artifact file name
    fn file_name(&self) -> &str {
        self.format().file_name()
    }
}

/// Artifact written to disk
#[derive(Debug, Clone)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub bytes: u64,
    /// BLAKE3 hex digest of the content
    pub digest: String,
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: BTreeMap<ExportFormat, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        let mut manager = Self {
            exporters: BTreeMap::new(),
        };

        manager.register(Box::new(super::xml::XmlExporter::new()));
        manager.register(Box::new(super::text::TextExporter::new()));
        manager.register(Box::new(super::csv::CsvExporter::new()));

        manager
    }

    /// Register an exporter, replacing any previous one for its format
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters.insert(exporter.format(), exporter);
    }

    /// Render visits in the specified format
    pub fn export(
        &self,
        visits: &[VisitRecord],
        names: &NameResolver<'_>,
        format: ExportFormat,
    ) -> Result<String> {
        let exporter = self.get(format).ok_or_else(|| {
            FieldRepError::Validation(format!("Unknown export format: {}", format))
        })?;

        exporter.export(visits, names)
    }

    /// Atomically replace the artifact for `format` inside `dir`
    pub fn write_artifact(
        &self,
        dir: &Path,
        format: ExportFormat,
        content: &str,
    ) -> Result<WrittenArtifact> {
        let exporter = self.get(format).ok_or_else(|| {
            FieldRepError::Validation(format!("Unknown export format: {}", format))
        })?;

        let path = dir.join(exporter.file_name());
        write_atomic(&path, content.as_bytes())?;

        Ok(WrittenArtifact {
            path,
            bytes: content.len() as u64,
            digest: blake3::hash(content.as_bytes()).to_hex().to_string(),
        })
    }

    /// Get list of available formats
    pub fn available_formats(&self) -> Vec<ExportFormat> {
        self.exporters.keys().copied().collect()
    }

    /// Check if a format is available
    pub fn has_format(&self, format: ExportFormat) -> bool {
        self.exporters.contains_key(&format)
    }

    /// Get an exporter by format
    pub fn get(&self, format: ExportFormat) -> Option<&dyn Exporter> {
        self.exporters.get(&format).map(|e| e.as_ref())
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Write to a temp file next to `path`, then rename over it.
///
/// On failure the temp file is removed and any existing file at `path`
/// is left untouched.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            FieldRepError::Validation(format!("Invalid artifact path: {:?}", path))
        })?;
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    let written = (|| -> std::io::Result<()> {
        let file = fs::File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    })();

    if let Err(e) = written.and_then(|_| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(FieldRepError::from(e)
            .with_context(format!("Failed to write {}", path.display())));
    }

    debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}
