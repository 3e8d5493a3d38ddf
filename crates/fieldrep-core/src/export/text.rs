//! Structured-line text exporter for visits

use super::exporter::Exporter;
use crate::error::Result;
use crate::names::NameResolver;
use crate::types::ExportFormat;
use crate::visit::VisitRecord;

/// Separator between `Key: value` fragments
pub const FRAGMENT_SEPARATOR: &str = " | ";

/// One line per visit made of `Key: value` fragments.
///
/// `ID` and `Date` are always written. Any other fragment is left out
/// entirely when its value is blank, so line length depends on how many
/// fields are populated.
pub struct TextExporter;

impl TextExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render a single visit line, without the trailing newline
    pub fn render_line(&self, visit: &VisitRecord, names: &NameResolver<'_>) -> String {
        let mut fragments = vec![
            format!("ID: {}", visit.id),
            format!("Date: {}", single_line(&visit.date_text())),
        ];

        let time = visit.time_of_day();
        let party_name = visit
            .party_code
            .as_deref()
            .map(|code| names.resolve_party_name(code));
        let representative_id = visit.representative_id.map(|id| id.to_string());
        let party_id = visit.party_id.map(|id| id.to_string());

        let optional = [
            ("Time", time.as_deref()),
            ("RepresentativeCode", visit.representative_code.as_deref()),
            ("RepresentativeId", representative_id.as_deref()),
            ("PartyCode", visit.party_code.as_deref()),
            ("PartyId", party_id.as_deref()),
            ("Party", party_name.as_deref()),
            ("Description", visit.description.as_deref()),
            ("Status", visit.status.map(|s| s.as_str())),
        ];
        for (key, value) in optional {
            match value {
                Some(value) if !value.trim().is_empty() => {
                    fragments.push(format!("{}: {}", key, single_line(value)));
                }
                _ => {}
            }
        }

        fragments.join(FRAGMENT_SEPARATOR)
    }
}

impl Default for TextExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for TextExporter {
    fn export(&self, visits: &[VisitRecord], names: &NameResolver<'_>) -> Result<String> {
        let mut output = String::new();
        for visit in visits {
            output.push_str(&self.render_line(visit, names));
            output.push('\n');
        }
        Ok(output)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }
}

/// Fold line breaks so one visit stays on one line
fn single_line(value: &str) -> String {
    if !value.contains(['\r', '\n']) {
        return value.to_string();
    }
    value
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VisitStatus;
    use crate::visit::{MemoryStore, Party};
    use pretty_assertions::assert_eq;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_party(Party {
            id: 100,
            code: "P-100".to_string(),
            first_name: Some("Ane".to_string()),
            last_name: Some("Etxeberria".to_string()),
            ..Party::default()
        });
        store
    }

    fn keys(line: &str) -> Vec<String> {
        line.split(FRAGMENT_SEPARATOR)
            .map(|f| f.split_once(": ").unwrap().0.to_string())
            .collect()
    }

    #[test]
    fn test_minimal_visit_has_two_fragments() {
        let store = store();
        let names = NameResolver::new(&store);
        let line = TextExporter::new().render_line(&VisitRecord::new(5, "2025-03-02"), &names);
        assert_eq!(line, "ID: 5 | Date: 2025-03-02");
        assert_eq!(keys(&line).len(), 2);
    }

    #[test]
    fn test_full_visit_has_every_fragment_in_order() {
        let store = store();
        let names = NameResolver::new(&store);
        let visit = VisitRecord::new(1, "2025-03-02")
            .with_time("09:30")
            .with_representative("C-07", Some(7))
            .with_party("P-100", Some(100))
            .with_description("Quarterly check, 10% discount")
            .with_status(VisitStatus::Done);

        let line = TextExporter::new().render_line(&visit, &names);
        assert_eq!(
            line,
            "ID: 1 | Date: 2025-03-02 | Time: 09:30 | RepresentativeCode: C-07 | \
             RepresentativeId: 7 | PartyCode: P-100 | PartyId: 100 | Party: Ane Etxeberria | \
             Description: Quarterly check, 10% discount | Status: Done"
        );
        assert_eq!(
            keys(&line),
            vec![
                "ID",
                "Date",
                "Time",
                "RepresentativeCode",
                "RepresentativeId",
                "PartyCode",
                "PartyId",
                "Party",
                "Description",
                "Status"
            ]
        );
    }

    #[test]
    fn test_blank_fields_are_omitted_not_empty() {
        let store = store();
        let names = NameResolver::new(&store);
        let visit = VisitRecord::new(2, "2025-03-15")
            .with_representative("C-07", None)
            .with_party("P-999", None)
            .with_description("   ")
            .with_status(VisitStatus::Pending);

        let line = TextExporter::new().render_line(&visit, &names);
        assert_eq!(
            line,
            "ID: 2 | Date: 2025-03-15 | RepresentativeCode: C-07 | PartyCode: P-999 | \
             Party: P-999 | Status: Pending"
        );
        assert!(!line.contains("Description"));
    }

    #[test]
    fn test_multiline_description_stays_on_one_line() {
        let store = store();
        let names = NameResolver::new(&store);
        let visits = vec![VisitRecord::new(3, "2025-03-02").with_description("first\r\nsecond")];

        let out = TextExporter::new().export(&visits, &names).unwrap();
        assert_eq!(out, "ID: 3 | Date: 2025-03-02 | Description: first second\n");
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_values_are_written_untrimmed() {
        let store = store();
        let names = NameResolver::new(&store);
        let visit = VisitRecord::new(4, "2025-03-02").with_description(" note ");

        let line = TextExporter::new().render_line(&visit, &names);
        assert_eq!(line, "ID: 4 | Date: 2025-03-02 | Description:  note ");
    }

    #[test]
    fn test_each_line_ends_with_newline() {
        let store = store();
        let names = NameResolver::new(&store);
        let visits = vec![
            VisitRecord::new(1, "2025-03-02"),
            VisitRecord::new(2, "2025-03-03"),
        ];
        let out = TextExporter::new().export(&visits, &names).unwrap();
        assert_eq!(out, "ID: 1 | Date: 2025-03-02\nID: 2 | Date: 2025-03-03\n");
    }
}
