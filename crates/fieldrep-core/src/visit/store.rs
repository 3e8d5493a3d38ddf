//! Visit storage trait and abstractions

use super::model::{Party, Representative, VisitRecord};
use crate::error::Result;

/// Read-only view of the application database used by exports
pub trait VisitStore: Send + Sync {
    /// All visits owned by a representative
    fn find_visits_by_representative(&self, code: &str) -> Result<Vec<VisitRecord>>;

    /// Visits owned by a representative dated inside the given month
    fn find_visits_by_representative_and_period(
        &self,
        code: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<VisitRecord>>;

    /// Look up a party by its code
    fn find_party_by_code(&self, code: &str) -> Result<Option<Party>>;

    /// Look up a representative by its code
    fn find_representative_by_code(&self, code: &str) -> Result<Option<Representative>>;
}
