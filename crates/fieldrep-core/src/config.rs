//! Configuration management for fieldrep

use crate::error::{FieldRepError, Result};
use crate::guard::DEFAULT_MIN_FREE_BYTES;
use crate::types::ExportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
    /// Storage settings
    pub storage: StorageConfig,
}

/// Export-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory artifacts are written to; defaults to `<data_dir>/exports`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Free bytes required before an export starts
    pub min_free_bytes: u64,
    /// Formats written by each export, in order
    pub formats: Vec<ExportFormat>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            min_free_bytes: DEFAULT_MIN_FREE_BYTES,
            formats: ExportFormat::ALL.to_vec(),
        }
    }
}

impl ExportConfig {
    /// Configured output directory, or `exports` under the data directory
    pub fn resolve_output_dir(&self, data_dir: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("exports"))
    }
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `agenda.json` and `session.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FieldRepError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| {
            FieldRepError::from(e).with_context(format!("Failed to read {}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FieldRepError::Toml(e.to_string()))
    }

    /// Check values that deserialize fine but cannot drive an export
    pub fn validate(&self) -> Result<()> {
        let formats = &self.export.formats;
        if formats.is_empty() {
            return Err(FieldRepError::Config(
                "export.formats must name at least one format".to_string(),
            ));
        }
        for (i, format) in formats.iter().enumerate() {
            if formats[..i].contains(format) {
                return Err(FieldRepError::Config(format!(
                    "export.formats lists {} more than once",
                    format
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.min_free_bytes, 512 * 1024);
        assert_eq!(config.export.formats, ExportFormat::ALL.to_vec());
        assert!(config.export.output_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml_string().unwrap();
        assert!(toml.contains("[export]"));
        assert!(toml.contains("min_free_bytes = 524288"));
        assert!(toml.contains("\"text\""));

        let config2 = Config::from_toml_str(&toml).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [export]
            formats = ["csv"]

            [storage]
            data_dir = "/var/lib/fieldrep"
            "#,
        )
        .unwrap();
        assert_eq!(config.export.formats, vec![ExportFormat::Csv]);
        assert_eq!(config.export.min_free_bytes, DEFAULT_MIN_FREE_BYTES);
        assert_eq!(
            config.export.resolve_output_dir(Path::new("/var/lib/fieldrep")),
            PathBuf::from("/var/lib/fieldrep/exports")
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = Config::from_toml_str("[export]\nformats = [\"pdf\"]\n").unwrap_err();
        assert!(matches!(err, FieldRepError::Toml(_)));
    }

    #[test]
    fn test_validate_formats() {
        let mut config = Config::default();
        config.export.formats.clear();
        assert!(config.validate().is_err());

        config.export.formats = vec![ExportFormat::Xml, ExportFormat::Xml];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("xml more than once"));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fieldrep.toml");
        fs::write(&path, "[export]\nmin_free_bytes = 1024\noutput_dir = \"out\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.export.min_free_bytes, 1024);
        assert_eq!(
            config.export.resolve_output_dir(Path::new("/data")),
            PathBuf::from("out")
        );

        let missing = Config::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, FieldRepError::FileNotFound(_)));
    }
}
