/// HTTP client for wiki page fetching
///
/// The fandom wiki serves different markup (or a challenge page) to
/// clients without browser-like headers, so every request carries a full
/// browser header set. One `PageClient` is shared across the whole scrape.
use crate::arguments::is_debug_scraper_enabled;
use crate::errors::ScrapeError;
use crate::logger::{self, LogTag};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/122.0.0.0 Safari/537.36";

pub struct PageClient {
    client: Client,
    timeout: Duration,
}

impl PageClient {
    /// Build a client with browser-like default headers and a per-request
    /// timeout
    pub fn new(referer: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        if let Ok(value) = HeaderValue::from_str(referer) {
            headers.insert(REFERER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ScrapeError::Network {
                url: referer.to_string(),
                source: e,
            })?;

        Ok(Self { client, timeout })
    }

    /// Fetch a page and return its body as HTML text
    pub async fn get_html(&self, url: &str) -> Result<String, ScrapeError> {
        if is_debug_scraper_enabled() {
            logger::debug(LogTag::Scraper, &format!("GET {}", url));
        }

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ScrapeError::Network {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ScrapeError::Network {
            url: url.to_string(),
            source: e,
        })
    }
}
