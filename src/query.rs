/// Read-only query facade over the cache store
///
/// Every operation takes one snapshot reference at call start and works
/// against that view only, so a refresh committing mid-call can never
/// produce mixed results. Records are cloned out because the HTTP layer
/// serializes owned values.
use crate::cache::{CacheSnapshot, CacheStore};
use crate::skins::SkinRecord;
use std::sync::Arc;

#[derive(Clone)]
pub struct QueryService {
    store: Arc<CacheStore>,
}

impl QueryService {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self { store }
    }

    /// The snapshot all other operations would currently read from
    pub fn snapshot(&self) -> Arc<CacheSnapshot> {
        self.store.current()
    }

    /// All cached skins in scrape order
    pub fn all_skins(&self) -> Vec<SkinRecord> {
        self.store.current().records().to_vec()
    }

    /// Skins for one character (case-insensitive); unknown characters
    /// yield an empty list, not an error
    pub fn by_character(&self, name: &str) -> Vec<SkinRecord> {
        self.store
            .current()
            .get_by_character(name)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn by_id(&self, skin_id: u64) -> Option<SkinRecord> {
        self.store.current().get_by_id(skin_id).cloned()
    }

    /// Case-insensitive substring match over skin and character names;
    /// an empty pattern matches everything
    pub fn by_name_pattern(&self, pattern: &str) -> Vec<SkinRecord> {
        self.store
            .current()
            .search(pattern)
            .into_iter()
            .cloned()
            .collect()
    }
}
