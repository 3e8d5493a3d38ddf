//! Visit, party and representative records

use crate::types::VisitStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged visit of a representative to a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Unique identifier assigned at creation
    pub id: i64,
    /// Visit date, `yyyy-MM-dd` optionally followed by a time
    pub visit_date: String,
    /// Time of day (`HH:mm`) when stored apart from the date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Code of the owning representative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative_code: Option<String>,
    /// Numeric id of the owning representative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative_id: Option<i64>,
    /// Code of the visited party
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_code: Option<String>,
    /// Numeric id of the visited party
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<i64>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VisitStatus>,
}

impl VisitRecord {
    /// Create a visit with only the mandatory fields set
    pub fn new(id: i64, visit_date: impl Into<String>) -> Self {
        Self {
            id,
            visit_date: visit_date.into(),
            time: None,
            representative_code: None,
            representative_id: None,
            party_code: None,
            party_id: None,
            description: None,
            status: None,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_representative(mut self, code: impl Into<String>, id: Option<i64>) -> Self {
        self.representative_code = Some(code.into());
        self.representative_id = id;
        self
    }

    pub fn with_party(mut self, code: impl Into<String>, id: Option<i64>) -> Self {
        self.party_code = Some(code.into());
        self.party_id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: VisitStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Calendar date parsed from the leading `yyyy-MM-dd`
    pub fn date(&self) -> Option<NaiveDate> {
        let head = self.visit_date.trim().get(..10)?;
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }

    /// Date part for display; falls back to the raw value when unparseable
    pub fn date_text(&self) -> String {
        match self.date() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => self.visit_date.trim().to_string(),
        }
    }

    /// Explicit time, or the time carried after the date
    pub fn time_of_day(&self) -> Option<String> {
        if let Some(time) = non_blank(self.time.as_deref()) {
            return Some(time.to_string());
        }
        let rest = self.visit_date.trim().get(10..)?;
        let rest = rest.trim_start_matches(['T', ' ']).trim();
        if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }
    }

    /// Whether the visit is owned by the given representative code
    pub fn is_owned_by(&self, code: &str) -> bool {
        self.representative_code
            .as_deref()
            .map(|c| c.trim() == code.trim())
            .unwrap_or(false)
    }
}

/// Member or business partner who is the subject of a visit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Party {
    pub id: i64,
    /// Code referenced by visits
    pub code: String,
    /// National or tax id
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Reference to a stored photo
    #[serde(default)]
    pub photo: Option<String>,
}

/// Field-sales user who owns visits
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Representative {
    pub id: i64,
    /// Unique code
    pub code: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Records that can be shown by a person's name
pub trait DisplayName {
    fn first_name(&self) -> Option<&str>;
    fn last_name(&self) -> Option<&str>;

    /// Identifier shown when the record has no name
    fn secondary_id(&self) -> Option<&str> {
        None
    }

    /// `first last`, omitting the separator when the last name is blank
    fn full_name(&self) -> String {
        let first = self.first_name().map(str::trim).unwrap_or("");
        match non_blank(self.last_name()) {
            Some(last) if first.is_empty() => last.to_string(),
            Some(last) => format!("{} {}", first, last),
            None => first.to_string(),
        }
    }

    /// Full name, else the secondary id, else empty
    fn display_name(&self) -> String {
        let name = self.full_name();
        if !name.is_empty() {
            return name;
        }
        self.secondary_id()
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

impl DisplayName for Party {
    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    fn secondary_id(&self) -> Option<&str> {
        self.national_id.as_deref()
    }
}

impl DisplayName for Representative {
    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }
}

/// Trimmed value, or None when absent or blank
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn party(first: Option<&str>, last: Option<&str>, nid: Option<&str>) -> Party {
        Party {
            id: 1,
            code: "P-1".to_string(),
            national_id: nid.map(String::from),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            ..Party::default()
        }
    }

    #[test]
    fn test_date_parsing() {
        let visit = VisitRecord::new(1, "2025-03-02");
        assert_eq!(visit.date(), NaiveDate::from_ymd_opt(2025, 3, 2));
        assert_eq!(visit.time_of_day(), None);

        let with_time = VisitRecord::new(2, "2025-03-02 09:30");
        assert_eq!(with_time.date(), NaiveDate::from_ymd_opt(2025, 3, 2));
        assert_eq!(with_time.date_text(), "2025-03-02");
        assert_eq!(with_time.time_of_day(), Some("09:30".to_string()));

        let bad = VisitRecord::new(3, "02/03/2025");
        assert_eq!(bad.date(), None);
        assert_eq!(bad.date_text(), "02/03/2025");
    }

    #[test]
    fn test_explicit_time_wins() {
        let visit = VisitRecord::new(1, "2025-03-02T08:00").with_time("10:15");
        assert_eq!(visit.time_of_day(), Some("10:15".to_string()));

        let blank = VisitRecord::new(1, "2025-03-02T08:00").with_time("  ");
        assert_eq!(blank.time_of_day(), Some("08:00".to_string()));
    }

    #[test]
    fn test_ownership() {
        let visit = VisitRecord::new(1, "2025-03-02").with_representative(" C-07 ", None);
        assert!(visit.is_owned_by("C-07"));
        assert!(!visit.is_owned_by("C-08"));
        assert!(!VisitRecord::new(2, "2025-03-02").is_owned_by("C-07"));
    }

    #[test]
    fn test_display_name_rules() {
        assert_eq!(
            party(Some(" Ane "), Some(" Etxeberria "), None).display_name(),
            "Ane Etxeberria"
        );
        assert_eq!(party(Some("Ane"), Some("  "), None).display_name(), "Ane");
        assert_eq!(
            party(None, None, Some("12345678Z")).display_name(),
            "12345678Z"
        );
        assert_eq!(party(Some(""), None, None).display_name(), "");
    }

    #[test]
    fn test_representative_has_no_secondary_id() {
        let rep = Representative {
            id: 7,
            code: "C-07".to_string(),
            ..Representative::default()
        };
        assert_eq!(rep.display_name(), "");
    }

    #[test]
    fn test_visit_json_skips_empty_fields() {
        let visit = VisitRecord::new(4, "2025-03-15").with_status(VisitStatus::Pending);
        let json = serde_json::to_string(&visit).unwrap();
        assert!(!json.contains("description"));
        let back: VisitRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, visit);
    }
}
