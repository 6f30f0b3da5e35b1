//! Wiki scraping pipeline
//!
//! `ScrapeProvider` is the seam between the refresh coordinator and the
//! actual scraping code: the coordinator only needs something that can
//! produce skin records and report progress. `WikiScraper` is the real
//! implementation; tests substitute mocks.

pub mod client;
pub mod wiki;

pub use wiki::WikiScraper;

use crate::errors::ScrapeError;
use crate::skins::SkinRecord;
use async_trait::async_trait;

/// Progress callback: (heroes done, hero total estimate)
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

#[async_trait]
pub trait ScrapeProvider: Send + Sync {
    /// Run one full scrape, invoking `progress` as heroes are processed
    ///
    /// Returns the complete record set or the first fatal error. Partial
    /// results are never returned; the caller commits all or nothing.
    async fn scrape(&self, progress: &ProgressFn) -> Result<Vec<SkinRecord>, ScrapeError>;
}
