//! Visit records and their selection
//!
//! Visits are created elsewhere in the application; this module only reads
//! them. The [`VisitStore`] trait is the seam to the application database and
//! [`VisitSelector`] applies the export's ownership and period rules on top.
//!
//! # Example
//!
//! ```ignore
//! use fieldrep_core::visit::VisitSelector;
//! use fieldrep_core::types::Period;
//!
//! let selector = VisitSelector::new(&store);
//! let march = selector.select("C-07", Some(Period::new(2025, 3)?))?;
//! ```

mod model;
mod selector;
mod store;

pub use model::{DisplayName, Party, Representative, VisitRecord};
pub use selector::{sort_visits, VisitSelector};
pub use store::VisitStore;

#[cfg(test)]
pub use store::memory::MemoryStore;
