//! Signed-in representative persisted as `session.json`

use fieldrep_core::error::{FieldRepError, Result};
use fieldrep_core::export::write_atomic;
use fieldrep_core::session::SessionProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SESSION_FILE: &str = "session.json";

/// Contents of `session.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub representative_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative_name: Option<String>,
}

/// Session provider reading `<data_dir>/session.json`.
///
/// A missing or unreadable file means nobody is signed in.
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current record, if the file exists
    pub fn read(&self) -> Result<Option<SessionRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FieldRepError::from(e)
                    .with_context(format!("Failed to read {}", self.path.display())))
            }
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn sign_in(&self, code: &str, name: Option<&str>) -> Result<()> {
        let record = SessionRecord {
            representative_code: Some(code.trim().to_string()),
            representative_name: name.map(str::to_string),
        };
        write_atomic(&self.path, &serde_json::to_vec_pretty(&record)?)?;
        debug!("Signed in {} at {:?}", code, self.path);
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FieldRepError::from(e).with_context("Failed to remove session file")),
        }
    }
}

impl SessionProvider for FileSession {
    fn authenticated_representative_code(&self) -> Option<String> {
        match self.read() {
            Ok(record) => record.and_then(|r| r.representative_code),
            Err(e) => {
                warn!("Ignoring unreadable session file {:?}: {}", self.path, e);
                None
            }
        }
    }
}
