/// Structured error types for the scrape pipeline
///
/// Scrape failures are always recovered by the refresh coordinator: the
/// state machine moves to Failed and the previously committed snapshot
/// keeps serving reads. Nothing here is fatal to the process.
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport-level failure (DNS, connect, TLS, read)
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The wiki answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// The page was fetched but did not have the expected structure
    #[error("unexpected page layout at {url}: {reason}")]
    Layout { url: String, reason: String },

    /// A scraped URL could not be resolved against the wiki base
    #[error("invalid wiki URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The whole scrape exceeded the configured bound
    #[error("scrape timed out after {0:?}")]
    Timeout(Duration),
}
