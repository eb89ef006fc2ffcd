//! Per-period catalog cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use ccnews_core::{Catalog, YearMonth};

/// Append-only map from period to resolved catalog.
///
/// Entries are never evicted; a resolver lives for one process.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: RwLock<HashMap<String, Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, period: YearMonth) -> Option<Arc<Catalog>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&period.cache_key())
            .cloned()
    }

    /// Insert a catalog, keeping any entry that won a concurrent race.
    pub fn insert(&self, catalog: Catalog) -> Arc<Catalog> {
        let key = catalog.period.cache_key();
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key).or_insert_with(|| Arc::new(catalog)))
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
