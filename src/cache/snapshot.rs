/// Immutable snapshot of all cached skin records plus lookup indices
///
/// A snapshot is built in one pass and never mutated afterwards, so a
/// reader holding an `Arc<CacheSnapshot>` keeps a fully consistent view
/// no matter what the refresh pipeline does in the meantime.
use crate::logger::{self, LogTag};
use crate::skins::SkinRecord;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Lowercased copies of the searchable fields, precomputed at build time
struct SearchKey {
    skin_name: String,
    character_name: String,
}

pub struct CacheSnapshot {
    /// Records in original scrape order
    records: Vec<SkinRecord>,
    /// skin_id -> position in `records`
    by_id: HashMap<u64, usize>,
    /// lowercased character name -> positions in `records`, scrape order
    by_character: HashMap<String, Vec<usize>>,
    search_keys: Vec<SearchKey>,
    /// 0 only for the startup snapshot that has never been populated
    generation: u64,
    built_at: Option<DateTime<Utc>>,
}

impl CacheSnapshot {
    /// The pre-first-scrape snapshot: zero records, generation zero
    pub(crate) fn empty() -> Self {
        Self {
            records: Vec::new(),
            by_id: HashMap::new(),
            by_character: HashMap::new(),
            search_keys: Vec::new(),
            generation: 0,
            built_at: None,
        }
    }

    /// Build a snapshot and its indices from scraped records
    ///
    /// Records sharing a skin_id with an earlier record are dropped (first
    /// occurrence wins) so the id index stays unique.
    pub(crate) fn build(records: Vec<SkinRecord>, generation: u64) -> Self {
        let mut kept: Vec<SkinRecord> = Vec::with_capacity(records.len());
        let mut by_id: HashMap<u64, usize> = HashMap::with_capacity(records.len());

        for record in records {
            if by_id.contains_key(&record.skin_id) {
                logger::warning(
                    LogTag::Cache,
                    &format!(
                        "Duplicate skin id {} ('{}') dropped from snapshot",
                        record.skin_id, record.skin_name
                    ),
                );
                continue;
            }
            by_id.insert(record.skin_id, kept.len());
            kept.push(record);
        }

        let mut by_character: HashMap<String, Vec<usize>> = HashMap::new();
        let mut search_keys = Vec::with_capacity(kept.len());
        for (idx, record) in kept.iter().enumerate() {
            by_character
                .entry(record.character_name.to_lowercase())
                .or_default()
                .push(idx);
            search_keys.push(SearchKey {
                skin_name: record.skin_name.to_lowercase(),
                character_name: record.character_name.to_lowercase(),
            });
        }

        Self {
            records: kept,
            by_id,
            by_character,
            search_keys,
            generation,
            built_at: Some(Utc::now()),
        }
    }

    /// All records in original scrape order
    pub fn records(&self) -> &[SkinRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Commit counter; 0 means "never populated" (distinct from an empty
    /// scrape result, which commits with a non-zero generation)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        self.built_at
    }

    pub fn is_populated(&self) -> bool {
        self.generation > 0
    }

    pub fn get_by_id(&self, skin_id: u64) -> Option<&SkinRecord> {
        self.by_id.get(&skin_id).map(|&idx| &self.records[idx])
    }

    /// Records for one character (case-insensitive), in scrape order
    pub fn get_by_character(&self, character_name: &str) -> Vec<&SkinRecord> {
        match self.by_character.get(&character_name.to_lowercase()) {
            Some(indices) => indices.iter().map(|&idx| &self.records[idx]).collect(),
            None => Vec::new(),
        }
    }

    /// Case-insensitive substring search over skin and character names
    ///
    /// An empty pattern matches every record.
    pub fn search(&self, pattern: &str) -> Vec<&SkinRecord> {
        let needle = pattern.to_lowercase();
        self.search_keys
            .iter()
            .enumerate()
            .filter(|(_, key)| {
                key.skin_name.contains(&needle) || key.character_name.contains(&needle)
            })
            .map(|(idx, _)| &self.records[idx])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(character: &str, id: u64, name: &str) -> SkinRecord {
        SkinRecord {
            character_name: character.to_string(),
            source_url: format!("https://wiki.example/{}", id),
            skin_id: id,
            skin_name: name.to_string(),
            is_recolor: false,
        }
    }

    #[test]
    fn empty_snapshot_is_unpopulated() {
        let snapshot = CacheSnapshot::empty();
        assert!(snapshot.is_empty());
        assert!(!snapshot.is_populated());
        assert!(snapshot.built_at().is_none());
    }

    #[test]
    fn committed_empty_result_is_populated() {
        let snapshot = CacheSnapshot::build(Vec::new(), 1);
        assert!(snapshot.is_empty());
        assert!(snapshot.is_populated());
        assert!(snapshot.built_at().is_some());
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let snapshot = CacheSnapshot::build(
            vec![
                record("Magik", 1016001, "Default"),
                record("Magik", 1016002, "Punk"),
                record("Psylocke", 1016001, "Clash"),
            ],
            1,
        );
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get_by_id(1016001).unwrap().character_name, "Magik");
    }

    #[test]
    fn by_character_is_case_insensitive_and_ordered() {
        let snapshot = CacheSnapshot::build(
            vec![
                record("Adam Warlock", 1030001, "Default"),
                record("Magik", 1016001, "Default"),
                record("Adam Warlock", 1030002, "Blood Soul"),
            ],
            1,
        );
        let skins = snapshot.get_by_character("adam warlock");
        assert_eq!(skins.len(), 2);
        assert_eq!(skins[0].skin_id, 1030001);
        assert_eq!(skins[1].skin_id, 1030002);
        assert!(skins.iter().all(|s| s.character_name == "Adam Warlock"));
        assert!(snapshot.get_by_character("Unknown Hero").is_empty());
    }

    #[test]
    fn search_matches_skin_and_character_names() {
        let snapshot = CacheSnapshot::build(
            vec![
                record("Magik", 1016001, "Punk Rebel"),
                record("Punisher", 1014001, "Default"),
                record("Luna Snow", 1015001, "Mirae 2099"),
            ],
            1,
        );
        let hits = snapshot.search("punk");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].skin_id, 1016001);

        // "pun" hits both the skin name and the character name
        assert_eq!(snapshot.search("PUN").len(), 2);

        // Empty pattern matches all
        assert_eq!(snapshot.search("").len(), 3);
    }
}
