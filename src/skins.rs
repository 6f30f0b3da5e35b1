/// Core data model for scraped wiki data
///
/// These types are produced by the scraper and served by the query layer.
/// Records are immutable once a scrape has produced them; identity is the
/// wiki skin id.
use serde::{Deserialize, Serialize};

/// A hero entry from the wiki index page
///
/// Intermediate scrape model: hero pages are fetched one by one and each
/// yields the skin records for that character. The hero count doubles as
/// the progress total for a refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub url: String,
}

/// A single cosmetic skin for a playable character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinRecord {
    /// Character the skin belongs to
    pub character_name: String,
    /// Wiki page the record was scraped from
    pub source_url: String,
    /// Stable numeric wiki identifier (unique per skin)
    pub skin_id: u64,
    /// Display name of the skin
    pub skin_name: String,
    /// Palette-swap variant of a base skin
    pub is_recolor: bool,
}
