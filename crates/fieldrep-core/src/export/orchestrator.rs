//! Export orchestration: preflight, scoping, selection and artifact writes

use super::exporter::ExportManager;
use super::report::{ExportFailure, ExportReport, FormatReport, FormatStatus};
use crate::guard::ResourceGuard;
use crate::names::NameResolver;
use crate::session::{SessionProvider, SessionScope};
use crate::types::{ExportFormat, ExportScope, Period};
use crate::visit::{VisitRecord, VisitSelector, VisitStore};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Produces the visit report artifacts for the signed-in representative.
///
/// Each call runs the full pipeline: destination check, session lookup,
/// selection, then one serializer per requested format. A failing format
/// does not stop the others; everything is recorded in the returned
/// [`ExportReport`].
pub struct VisitExporter {
    store: Arc<dyn VisitStore>,
    session: Arc<dyn SessionProvider>,
    guard: ResourceGuard,
    manager: ExportManager,
    output_dir: PathBuf,
    formats: Vec<ExportFormat>,
}

/// Builder for [`VisitExporter`]
pub struct VisitExporterBuilder {
    store: Arc<dyn VisitStore>,
    session: Arc<dyn SessionProvider>,
    guard: Option<ResourceGuard>,
    manager: Option<ExportManager>,
    output_dir: PathBuf,
    formats: Vec<ExportFormat>,
}

impl VisitExporterBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn guard(mut self, guard: ResourceGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Replace the default exporters
    pub fn manager(mut self, manager: ExportManager) -> Self {
        self.manager = Some(manager);
        self
    }

    /// Formats to write, in order; duplicates are ignored
    pub fn formats(mut self, formats: impl IntoIterator<Item = ExportFormat>) -> Self {
        self.formats.clear();
        for format in formats {
            if !self.formats.contains(&format) {
                self.formats.push(format);
            }
        }
        self
    }

    pub fn build(self) -> VisitExporter {
        VisitExporter {
            store: self.store,
            session: self.session,
            guard: self.guard.unwrap_or_default(),
            manager: self.manager.unwrap_or_default(),
            output_dir: self.output_dir,
            formats: self.formats,
        }
    }
}

impl VisitExporter {
    pub fn builder(
        store: Arc<dyn VisitStore>,
        session: Arc<dyn SessionProvider>,
    ) -> VisitExporterBuilder {
        VisitExporterBuilder {
            store,
            session,
            guard: None,
            manager: None,
            output_dir: PathBuf::from("."),
            formats: ExportFormat::ALL.to_vec(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn formats(&self) -> &[ExportFormat] {
        &self.formats
    }

    pub fn store(&self) -> &dyn VisitStore {
        self.store.as_ref()
    }

    /// Export the month containing today
    pub fn export_current_period(&self) -> ExportReport {
        self.export(ExportScope::current_period())
    }

    /// Export one calendar month
    pub fn export_period(&self, year: i32, month: u32) -> ExportReport {
        match Period::new(year, month) {
            Ok(period) => self.export(ExportScope::Period(period)),
            Err(e) => {
                error!("Visit export aborted: {}", e);
                ExportReport::new(None).abort(ExportFailure::unexpected(e.to_string()))
            }
        }
    }

    /// Export every visit of the representative
    pub fn export_all(&self) -> ExportReport {
        self.export(ExportScope::All)
    }

    pub fn export(&self, scope: ExportScope) -> ExportReport {
        let mut report = ExportReport::new(Some(scope));

        if let Err(failure) = self.check_destination() {
            log_abort(scope, &failure);
            return report.abort(failure);
        }

        let (code, visits) = match self.select_for(scope) {
            Ok(selection) => selection,
            Err(failure) => {
                log_abort(scope, &failure);
                return report.abort(failure);
            }
        };
        report.representative = Some(code);
        report.visit_count = visits.len();

        if let Err(failure) = self.create_destination() {
            log_abort(scope, &failure);
            return report.abort(failure);
        }

        let names = NameResolver::new(self.store.as_ref());
        for &format in &self.formats {
            let format_report = self.write_format(format, &visits, &names);
            if let Some(failure) = format_report.failure() {
                error!("Failed to export {} visits: {}", format, failure);
            }
            report.formats.push(format_report);
        }

        if report.is_success() {
            info!(
                "Exported {} visits ({}) to {:?}",
                report.visit_count, scope, self.output_dir
            );
        } else {
            error!(
                "Visit export ({}) incomplete, failed formats: {:?}",
                scope,
                report.failed_formats()
            );
        }
        report
    }

    /// Visits the export would cover, without writing anything
    pub fn select(&self, scope: ExportScope) -> Result<Vec<VisitRecord>, ExportFailure> {
        self.select_for(scope).map(|(_, visits)| visits)
    }

    /// Guard the output dir, or its nearest existing ancestor while the
    /// dir itself has not been created yet
    fn check_destination(&self) -> Result<u64, ExportFailure> {
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(ExportFailure::DestinationUnavailable {
                path: self.output_dir.clone(),
                message: "not a directory".to_string(),
            });
        }
        let probe_dir = self
            .output_dir
            .ancestors()
            .find(|dir| !dir.as_os_str().is_empty() && dir.is_dir())
            .unwrap_or_else(|| Path::new("."));
        self.guard.check(probe_dir)
    }

    fn create_destination(&self) -> Result<(), ExportFailure> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ExportFailure::DestinationUnavailable {
                path: self.output_dir.clone(),
                message: e.to_string(),
            }
        })
    }

    fn select_for(&self, scope: ExportScope) -> Result<(String, Vec<VisitRecord>), ExportFailure> {
        let code = SessionScope::new(self.session.as_ref())
            .current_representative_code()
            .ok_or(ExportFailure::NoSession)?;

        let visits = VisitSelector::new(self.store.as_ref())
            .select(&code, scope.period())
            .map_err(|e| ExportFailure::unexpected(e.to_string()))?;

        debug!("Export ({}) for {} covers {} visits", scope, code, visits.len());
        Ok((code, visits))
    }

    fn write_format(
        &self,
        format: ExportFormat,
        visits: &[VisitRecord],
        names: &NameResolver<'_>,
    ) -> FormatReport {
        let path = self.output_dir.join(format.file_name());

        let status = match self.manager.export(visits, names, format) {
            Err(e) => FormatStatus::Failed {
                error: ExportFailure::unexpected(e.to_string()),
            },
            Ok(content) => match self.manager.write_artifact(&self.output_dir, format, &content) {
                Ok(artifact) => FormatStatus::Written {
                    records: visits.len(),
                    bytes: artifact.bytes,
                    digest: artifact.digest,
                },
                Err(e) if e.is_io() => FormatStatus::Failed {
                    error: ExportFailure::Io {
                        path: path.clone(),
                        message: e.to_string(),
                    },
                },
                Err(e) => FormatStatus::Failed {
                    error: ExportFailure::unexpected(e.to_string()),
                },
            },
        };

        FormatReport {
            format,
            path,
            status,
        }
    }
}

fn log_abort(scope: ExportScope, failure: &ExportFailure) {
    match failure {
        ExportFailure::InsufficientSpace { .. } => {
            warn!("Visit export ({}) skipped: {}", scope, failure)
        }
        _ => error!("Visit export ({}) aborted: {}", scope, failure),
    }
}
