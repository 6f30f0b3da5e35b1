/// Holder of the current committed snapshot
///
/// Readers take a cheap `Arc` clone of the latest snapshot and are never
/// blocked by an in-flight refresh; the refresh coordinator is the only
/// writer. Snapshots are built outside the lock, so the write section is
/// a pointer swap.
use super::snapshot::CacheSnapshot;
use crate::logger::{self, LogTag};
use crate::skins::SkinRecord;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub struct CacheStore {
    current: RwLock<Arc<CacheSnapshot>>,
    next_generation: AtomicU64,
}

impl CacheStore {
    /// Create a store holding the empty, never-populated snapshot
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(CacheSnapshot::empty())),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Latest committed snapshot, non-blocking
    pub fn current(&self) -> Arc<CacheSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Build a snapshot from scraped records and atomically install it
    ///
    /// Readers that already hold the previous snapshot keep a valid,
    /// unchanging view; no reader ever observes a half-built snapshot.
    pub fn commit(&self, records: Vec<SkinRecord>) -> Arc<CacheSnapshot> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let snapshot = Arc::new(CacheSnapshot::build(records, generation));

        logger::debug(
            LogTag::Cache,
            &format!(
                "Committing snapshot generation {} ({} records)",
                generation,
                snapshot.len()
            ),
        );

        *self.current.write() = Arc::clone(&snapshot);
        snapshot
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(character: &str, id: u64, name: &str) -> SkinRecord {
        SkinRecord {
            character_name: character.to_string(),
            source_url: String::new(),
            skin_id: id,
            skin_name: name.to_string(),
            is_recolor: false,
        }
    }

    #[test]
    fn starts_empty_and_unpopulated() {
        let store = CacheStore::new();
        let snapshot = store.current();
        assert!(snapshot.is_empty());
        assert!(!snapshot.is_populated());
    }

    #[test]
    fn commit_replaces_the_visible_snapshot() {
        let store = CacheStore::new();
        store.commit(vec![record("Magik", 1, "Old")]);
        store.commit(vec![record("Magik", 2, "New")]);

        let snapshot = store.current();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].skin_name, "New");
        assert!(snapshot.get_by_id(1).is_none());
    }

    #[test]
    fn old_reference_stays_valid_after_commit() {
        let store = CacheStore::new();
        store.commit(vec![record("Magik", 1, "Old")]);

        let held = store.current();
        store.commit(vec![record("Magik", 2, "New")]);

        // The held reference still sees the old world, fully intact
        assert_eq!(held.records()[0].skin_name, "Old");
        assert_eq!(store.current().records()[0].skin_name, "New");
    }

    #[test]
    fn generations_increase_with_each_commit() {
        let store = CacheStore::new();
        let first = store.commit(Vec::new());
        let second = store.commit(Vec::new());
        assert_eq!(first.generation(), 1);
        assert_eq!(second.generation(), 2);
        assert!(second.is_populated());
    }
}
