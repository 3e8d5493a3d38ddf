//! Display-name resolution for codes embedded in visits

use crate::visit::{DisplayName, VisitStore};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::debug;

/// Resolves party and representative codes to display names.
///
/// Resolution never fails: a code that cannot be resolved comes back
/// unchanged, surrounding whitespace included, so a broken reference degrades to the raw code in the
/// artifact. Results are cached for the lifetime of the resolver.
pub struct NameResolver<'a> {
    store: &'a dyn VisitStore,
    parties: RefCell<HashMap<String, String>>,
    representatives: RefCell<HashMap<String, String>>,
}

impl<'a> NameResolver<'a> {
    pub fn new(store: &'a dyn VisitStore) -> Self {
        Self {
            store,
            parties: RefCell::new(HashMap::new()),
            representatives: RefCell::new(HashMap::new()),
        }
    }

    /// Party display name for `code`
    pub fn resolve_party_name(&self, code: &str) -> String {
        let key = code.trim();
        if key.is_empty() {
            return String::new();
        }
        if let Some(name) = self.parties.borrow().get(code) {
            return name.clone();
        }

        let name = match self.store.find_party_by_code(key) {
            Ok(Some(party)) => party.display_name(),
            Ok(None) => code.to_string(),
            Err(e) => {
                debug!("Party lookup for {} failed, keeping code: {}", key, e);
                code.to_string()
            }
        };
        self.parties
            .borrow_mut()
            .insert(code.to_string(), name.clone());
        name
    }

    /// Representative display name for `code`
    pub fn resolve_representative_name(&self, code: &str) -> String {
        let key = code.trim();
        if key.is_empty() {
            return String::new();
        }
        if let Some(name) = self.representatives.borrow().get(code) {
            return name.clone();
        }

        let name = match self.store.find_representative_by_code(key) {
            Ok(Some(rep)) => rep.display_name(),
            Ok(None) => code.to_string(),
            Err(e) => {
                debug!(
                    "Representative lookup for {} failed, keeping code: {}",
                    key, e
                );
                code.to_string()
            }
        };
        self.representatives
            .borrow_mut()
            .insert(code.to_string(), name.clone());
        name
    }
}
