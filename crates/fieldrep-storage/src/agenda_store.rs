//! File system storage for visits, parties and representatives

use fieldrep_core::error::{FieldRepError, Result};
use fieldrep_core::export::write_atomic;
use fieldrep_core::types::Period;
use fieldrep_core::visit::{Party, Representative, VisitRecord, VisitStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current agenda file schema version
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const AGENDA_FILE: &str = "agenda.json";

/// On-disk snapshot of the application database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaFile {
    pub schema_version: u32,
    #[serde(default)]
    pub visits: Vec<VisitRecord>,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub representatives: Vec<Representative>,
}

impl AgendaFile {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            ..Self::default()
        }
    }
}

/// Default data directory (platform data dir, or ~/.fieldrep)
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "fieldrep", "fieldrep")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".fieldrep")
        })
}

/// Visit store backed by `agenda.json`.
///
/// The file is re-read on every query so changes made by the application
/// between exports are picked up. A missing file is an empty store.
pub struct FileSystemStore {
    base_dir: PathBuf,
    agenda_path: PathBuf,
}

impl FileSystemStore {
    /// Create a new file system store
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let agenda_path = base_dir.join(AGENDA_FILE);

        let store = Self {
            base_dir,
            agenda_path,
        };

        store.ensure_dirs()?;
        Ok(store)
    }

    /// Create store with the default data directory
    pub fn default_location() -> Result<Self> {
        Self::new(default_data_dir())
    }

    fn ensure_dirs(&self) -> Result<()> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir).map_err(|e| {
                FieldRepError::from(e).with_context("Failed to create data directory")
            })?;
            debug!("Created data directory: {:?}", self.base_dir);
        }
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn agenda_path(&self) -> &Path {
        &self.agenda_path
    }

    /// Read the whole snapshot
    pub fn load(&self) -> Result<AgendaFile> {
        let file = match fs::File::open(&self.agenda_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No agenda file at {:?}, treating as empty", self.agenda_path);
                return Ok(AgendaFile::new());
            }
            Err(e) => {
                return Err(FieldRepError::from(e)
                    .with_context(format!("Failed to open {}", self.agenda_path.display())))
            }
        };

        let agenda: AgendaFile = serde_json::from_reader(BufReader::new(file))?;
        if agenda.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(FieldRepError::UnsupportedSchemaVersion(agenda.schema_version));
        }
        Ok(agenda)
    }

    /// Replace the snapshot atomically
    pub fn import_snapshot(&self, agenda: &AgendaFile) -> Result<()> {
        let mut agenda = agenda.clone();
        agenda.schema_version = CURRENT_SCHEMA_VERSION;

        let content = serde_json::to_vec_pretty(&agenda)?;
        write_atomic(&self.agenda_path, &content)?;

        debug!(
            "Imported {} visits, {} parties, {} representatives to {:?}",
            agenda.visits.len(),
            agenda.parties.len(),
            agenda.representatives.len(),
            self.agenda_path
        );
        Ok(())
    }
}

impl VisitStore for FileSystemStore {
    fn find_visits_by_representative(&self, code: &str) -> Result<Vec<VisitRecord>> {
        Ok(self
            .load()?
            .visits
            .into_iter()
            .filter(|v| v.is_owned_by(code))
            .collect())
    }

    fn find_visits_by_representative_and_period(
        &self,
        code: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<VisitRecord>> {
        let period = Period::new(year, month)?;
        Ok(self
            .find_visits_by_representative(code)?
            .into_iter()
            .filter(|v| v.date().map(|d| period.contains(d)).unwrap_or(false))
            .collect())
    }

    fn find_party_by_code(&self, code: &str) -> Result<Option<Party>> {
        let code = code.trim();
        Ok(self
            .load()?
            .parties
            .into_iter()
            .find(|p| p.code.trim() == code))
    }

    fn find_representative_by_code(&self, code: &str) -> Result<Option<Representative>> {
        let code = code.trim();
        Ok(self
            .load()?
            .representatives
            .into_iter()
            .find(|r| r.code.trim() == code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldrep_core::types::VisitStatus;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_store() -> (FileSystemStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp_dir.path().join("data")).unwrap();
        (store, temp_dir)
    }

    fn snapshot() -> AgendaFile {
        let mut agenda = AgendaFile::new();
        agenda.visits = vec![
            VisitRecord::new(1, "2025-03-02")
                .with_representative("C-07", Some(7))
                .with_party("P-100", Some(100))
                .with_status(VisitStatus::Done),
            VisitRecord::new(2, "2025-04-10").with_representative("C-07", Some(7)),
            VisitRecord::new(3, "2025-03-05").with_representative("C-99", None),
        ];
        agenda.parties = vec![Party {
            id: 100,
            code: "P-100".to_string(),
            first_name: Some("Ane".to_string()),
            ..Party::default()
        }];
        agenda
    }

    #[test]
    fn test_store_creation() {
        let (store, _temp) = create_test_store();
        assert!(store.base_dir().exists());
        assert!(store.agenda_path().ends_with("agenda.json"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.load().unwrap(), AgendaFile::new());
        assert!(store.find_visits_by_representative("C-07").unwrap().is_empty());
        assert!(store.find_party_by_code("P-100").unwrap().is_none());
    }

    #[test]
    fn test_import_and_query() {
        let (store, _temp) = create_test_store();
        store.import_snapshot(&snapshot()).unwrap();

        let ids: Vec<_> = store
            .find_visits_by_representative("C-07")
            .unwrap()
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let march = store
            .find_visits_by_representative_and_period("C-07", 2025, 3)
            .unwrap();
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].id, 1);

        let party = store.find_party_by_code(" P-100 ").unwrap().unwrap();
        assert_eq!(party.id, 100);
    }

    #[test]
    fn test_invalid_period_is_error() {
        let (store, _temp) = create_test_store();
        let err = store
            .find_visits_by_representative_and_period("C-07", 2025, 0)
            .unwrap_err();
        assert!(matches!(err, FieldRepError::InvalidPeriod(_)));
    }

    #[test]
    fn test_atomic_import_leaves_no_temp() {
        let (store, _temp) = create_test_store();
        store.import_snapshot(&snapshot()).unwrap();

        let content = fs::read_to_string(store.agenda_path()).unwrap();
        assert!(content.contains("schema_version"));

        let leftovers = fs::read_dir(store.base_dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let (store, _temp) = create_test_store();
        fs::write(store.agenda_path(), r#"{"schema_version": 99}"#).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, FieldRepError::UnsupportedSchemaVersion(99)));
    }

    #[test]
    fn test_legacy_status_labels() {
        let (store, _temp) = create_test_store();
        fs::write(
            store.agenda_path(),
            r#"{
                "schema_version": 1,
                "visits": [
                    {"id": 8, "visit_date": "2025-03-09", "representative_code": "C-07", "status": "Zain"}
                ]
            }"#,
        )
        .unwrap();

        let visits = store.find_visits_by_representative("C-07").unwrap();
        assert_eq!(visits[0].status, Some(VisitStatus::Pending));
    }
}
