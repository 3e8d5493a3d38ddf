//! fieldrep-core - Core library for fieldrep
//!
//! This crate provides the visit report export logic for field
//! representatives: visit selection scoped to the signed-in representative,
//! display-name resolution, the XML, text and CSV serializers, and the export
//! orchestrator that writes them.

pub mod error;
pub mod types;
pub mod config;
pub mod visit;
pub mod session;
pub mod guard;
pub mod names;
pub mod export;

pub use error::{FieldRepError, Result};
pub use types::*;
