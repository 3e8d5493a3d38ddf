//! fieldrep-storage - Storage library for fieldrep
//!
//! This crate provides file-backed implementations of the visit store and
//! the signed-in session, both kept as JSON under one data directory.

mod agenda_store;
mod session_file;

pub use agenda_store::{default_data_dir, AgendaFile, FileSystemStore, CURRENT_SCHEMA_VERSION};
pub use session_file::{FileSession, SessionRecord};
