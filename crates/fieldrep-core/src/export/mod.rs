//! Visit report export
//!
//! This module turns the signed-in representative's visits into report
//! artifacts in the export directory.
//!
//! # Overview
//!
//! Export supports three formats, each written to a fixed file name:
//! - XML (`agenda.xml`), one `<visit>` node per record
//! - Text (`agenda.txt`), one `Key: value | ...` line per record
//! - CSV (`agenda.csv`), UTF-8 with BOM and a header row
//!
//! Every artifact is replaced atomically, so a failed export never leaves a
//! truncated file behind.
//!
//! # Example
//!
//! ```ignore
//! use fieldrep_core::export::VisitExporter;
//!
//! let exporter = VisitExporter::builder(store, session)
//!     .output_dir("/sdcard/fieldrep")
//!     .build();
//! let report = exporter.export_period(2025, 3);
//! if !report.is_success() {
//!     eprintln!("export failed: {:?}", report.failed_formats());
//! }
//! ```

mod csv;
mod exporter;
mod orchestrator;
mod report;
mod text;
mod xml;

pub use csv::CsvExporter;
pub use exporter::{write_atomic, ExportManager, Exporter, WrittenArtifact};
pub use orchestrator::{VisitExporter, VisitExporterBuilder};
pub use report::{ExportFailure, ExportReport, FormatReport, FormatStatus};
pub use text::TextExporter;
pub use xml::XmlExporter;
