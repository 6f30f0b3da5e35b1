//! In-memory cache of scraped skin records
//!
//! `CacheStore` holds the single committed `CacheSnapshot`; the refresh
//! coordinator is its only writer and every read path goes through an
//! immutable snapshot reference.

pub mod snapshot;
pub mod store;

pub use snapshot::CacheSnapshot;
pub use store::CacheStore;
