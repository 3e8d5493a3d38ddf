//! Error types for fieldrep

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fieldrep
#[derive(Debug, Error)]
pub enum FieldRepError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// XML writer error
    #[error("XML error: {0}")]
    Xml(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Year/month pair outside the calendar
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(u32),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FieldRepError>,
    },
}

impl FieldRepError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FieldRepError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the root cause is an I/O failure
    pub fn is_io(&self) -> bool {
        match self {
            FieldRepError::Io(_) => true,
            FieldRepError::WithContext { source, .. } => source.is_io(),
            _ => false,
        }
    }
}

impl From<toml::de::Error> for FieldRepError {
    fn from(err: toml::de::Error) -> Self {
        FieldRepError::Toml(err.to_string())
    }
}

/// Result type alias for fieldrep
pub type Result<T> = std::result::Result<T, FieldRepError>;
