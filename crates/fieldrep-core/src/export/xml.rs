//! XML exporter for visits

use super::exporter::Exporter;
use crate::error::{FieldRepError, Result};
use crate::names::NameResolver;
use crate::types::ExportFormat;
use crate::visit::VisitRecord;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

const ROOT: &str = "agenda";
const VISIT: &str = "visit";

/// Hierarchical document with one `<visit>` node per record.
///
/// Every field is always present; empty values become empty elements.
pub struct XmlExporter {
    indent: usize,
}

impl XmlExporter {
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    fn write_visit<W: Write>(&self, writer: &mut Writer<W>, visit: &VisitRecord) -> Result<()> {
        writer
            .write_event(Event::Start(BytesStart::new(VISIT)))
            .map_err(xml_error)?;

        let date = visit.date_text();
        let time = visit.time_of_day().unwrap_or_default();
        let status = visit.status.map(|s| s.as_str()).unwrap_or("");
        let fields: [(&str, &str); 6] = [
            ("date", date.as_str()),
            ("time", time.as_str()),
            (
                "representative_code",
                visit.representative_code.as_deref().unwrap_or(""),
            ),
            ("party_code", visit.party_code.as_deref().unwrap_or("")),
            ("description", visit.description.as_deref().unwrap_or("")),
            ("status", status),
        ];
        for (name, value) in fields {
            write_field(writer, name, value)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(VISIT)))
            .map_err(xml_error)?;
        Ok(())
    }
}

impl Default for XmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for XmlExporter {
    fn export(&self, visits: &[VisitRecord], _names: &NameResolver<'_>) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Start(BytesStart::new(ROOT)))
            .map_err(xml_error)?;
        for visit in visits {
            self.write_visit(&mut writer, visit)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(ROOT)))
            .map_err(xml_error)?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(xml_error)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Xml
    }
}

fn write_field<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(xml_error);
    }
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

fn xml_error(err: impl std::fmt::Display) -> FieldRepError {
    FieldRepError::Xml(err.to_string())
}
