/// API response type definitions
///
/// Standard response structures for the REST endpoints. Skin records are
/// serialized as-is from the data model.
use crate::refresh::RefreshState;
use crate::skins::SkinRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// List of skins plus cache context
#[derive(Debug, Clone, Serialize)]
pub struct SkinListResponse {
    pub count: usize,
    pub skins: Vec<SkinRecord>,
    /// False until the first successful refresh has committed
    pub cache_populated: bool,
}

/// Skins for one character
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSkinsResponse {
    pub character: String,
    pub count: usize,
    pub skins: Vec<SkinRecord>,
}

/// Answer to a manual refresh trigger
#[derive(Debug, Clone, Serialize)]
pub struct RefreshAcceptedResponse {
    pub message: String,
}

/// Current refresh state plus scheduling context
#[derive(Debug, Clone, Serialize)]
pub struct RefreshStatusResponse {
    #[serde(flatten)]
    pub state: RefreshState,
    pub last_refresh: Option<DateTime<Utc>>,
    pub next_scheduled_refresh: Option<DateTime<Utc>>,
    pub cached_records: usize,
}
