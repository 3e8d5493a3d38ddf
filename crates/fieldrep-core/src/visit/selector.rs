//! Representative-scoped visit selection

use super::model::VisitRecord;
use super::store::VisitStore;
use crate::error::Result;
use crate::types::Period;
use tracing::{debug, warn};

/// Selects the visits an export covers
pub struct VisitSelector<'a> {
    store: &'a dyn VisitStore,
}

impl<'a> VisitSelector<'a> {
    pub fn new(store: &'a dyn VisitStore) -> Self {
        Self { store }
    }

    /// Visits owned by `code`, optionally bounded to one month.
    ///
    /// Records owned by anyone else are dropped even if the store returns
    /// them. The result is sorted by date, then id; undated records go last.
    pub fn select(&self, code: &str, period: Option<Period>) -> Result<Vec<VisitRecord>> {
        let code = code.trim();
        let fetched = match period {
            None => self.store.find_visits_by_representative(code)?,
            Some(p) => self
                .store
                .find_visits_by_representative_and_period(code, p.year(), p.month())?,
        };
        let fetched_count = fetched.len();

        let mut visits: Vec<VisitRecord> = fetched
            .into_iter()
            .filter(|visit| {
                if visit.is_owned_by(code) {
                    return true;
                }
                warn!(
                    "Dropping visit {} owned by {:?} from export for {}",
                    visit.id, visit.representative_code, code
                );
                false
            })
            .filter(|visit| match period {
                None => true,
                Some(p) => visit.date().map(|d| p.contains(d)).unwrap_or(false),
            })
            .collect();

        sort_visits(&mut visits);

        debug!(
            "Selected {} of {} fetched visits for {} ({})",
            visits.len(),
            fetched_count,
            code,
            period.map(|p| p.to_string()).unwrap_or_else(|| "all".to_string())
        );
        Ok(visits)
    }
}

/// Ascending by date then id, unparseable dates last
pub fn sort_visits(visits: &mut [VisitRecord]) {
    visits.sort_by(|a, b| {
        let (da, db) = (a.date(), b.date());
        da.is_none()
            .cmp(&db.is_none())
            .then(da.cmp(&db))
            .then(a.id.cmp(&b.id))
    });
}
