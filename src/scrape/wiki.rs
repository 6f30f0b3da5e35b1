/// Fandom wiki scraper
///
/// Three-level crawl: the heroes index page lists every playable
/// character, each hero page lists its skins in catalog/recolor tabs,
/// and each skin page carries the stable numeric id in a rarity table.
/// Parsing is kept in synchronous helpers over `&str` so the HTML
/// documents never live across an await point and the helpers are
/// testable with inline fixtures.
use crate::errors::ScrapeError;
use crate::logger::{self, LogTag};
use crate::scrape::client::PageClient;
use crate::scrape::{ProgressFn, ScrapeProvider};
use crate::skins::{Hero, SkinRecord};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: Lazy<Selector> = Lazy::new(|| Selector::parse($css).unwrap());
    };
}

selector!(HERO_LINK_SELECTOR, ".herocard-link a");
selector!(TAB_CONTENT_SELECTOR, ".wds-tab__content");
selector!(SKIN_LINK_SELECTOR, ".charcat-wrapper a[href^='/wiki/']");
selector!(
    ID_TABLE_SELECTOR,
    "table.char-table-chronology, table.char-table-epic, \
     table.char-table-legendary, table.char-table-rare"
);
selector!(ROW_SELECTOR, "tr");
selector!(HEADER_CELL_SELECTOR, "th");
selector!(DATA_CELL_SELECTOR, "td");

/// Minimum digit count for a table cell to qualify as a skin id
const MIN_ID_DIGITS: usize = 6;

pub struct WikiScraper {
    client: PageClient,
    base_url: Url,
    heroes_url: String,
}

impl WikiScraper {
    /// `base_url` is the wiki root without a trailing slash, e.g.
    /// `https://marvelrivals.fandom.com/wiki`
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ScrapeError> {
        let base = Url::parse(base_url).map_err(|e| ScrapeError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let referer = format!("{}/", base.origin().ascii_serialization());
        let heroes_url = format!("{}/Heroes", base_url.trim_end_matches('/'));
        let client = PageClient::new(&referer, request_timeout)?;

        Ok(Self {
            client,
            base_url: base,
            heroes_url,
        })
    }

    async fn fetch_heroes(&self) -> Result<Vec<Hero>, ScrapeError> {
        let html = self.client.get_html(&self.heroes_url).await?;
        let heroes = parse_heroes(&html, &self.base_url);
        if heroes.is_empty() {
            // A markup change on the index page would otherwise commit an
            // empty snapshot over good data
            return Err(ScrapeError::Layout {
                url: self.heroes_url.clone(),
                reason: "no hero links found on index page".to_string(),
            });
        }
        Ok(heroes)
    }

    /// Scrape all skins for one hero
    ///
    /// Individual skin pages that fail to fetch or carry no readable id
    /// are skipped; a failure to fetch the hero page itself aborts the
    /// whole scrape.
    async fn fetch_hero_skins(&self, hero: &Hero) -> Result<Vec<SkinRecord>, ScrapeError> {
        let html = self.client.get_html(&hero.url).await?;
        let links = parse_skin_links(&html, &self.base_url, &hero.name);

        let mut records: Vec<SkinRecord> = Vec::with_capacity(links.len() + 1);
        for link in links {
            let skin_id = match self.client.get_html(&link.url).await {
                Ok(page) => parse_skin_id(&page),
                Err(e) => {
                    logger::warning(
                        LogTag::Scraper,
                        &format!("Skipping skin page for '{}': {}", link.name, e),
                    );
                    None
                }
            };
            let Some(skin_id) = skin_id else {
                logger::debug(
                    LogTag::Scraper,
                    &format!("No id found for skin '{}' of {}", link.name, hero.name),
                );
                continue;
            };
            records.push(SkinRecord {
                character_name: hero.name.clone(),
                source_url: link.url,
                skin_id,
                skin_name: link.name,
                is_recolor: link.is_recolor,
            });
        }

        // The wiki has no page for the default look; synthesize it from
        // the hero's id prefix. Heroes with no identifiable skins yield
        // no records at all.
        if let Some(first) = records.first() {
            if let Some(default_id) = default_skin_id(first.skin_id) {
                records.push(SkinRecord {
                    character_name: hero.name.clone(),
                    source_url: hero.url.clone(),
                    skin_id: default_id,
                    skin_name: format!("{} (Default)", hero.name),
                    is_recolor: false,
                });
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl ScrapeProvider for WikiScraper {
    async fn scrape(&self, progress: &ProgressFn) -> Result<Vec<SkinRecord>, ScrapeError> {
        let heroes = self.fetch_heroes().await?;
        logger::info(
            LogTag::Scraper,
            &format!("Found {} heroes on the index page", heroes.len()),
        );
        progress(0, heroes.len());

        let mut records = Vec::new();
        for (i, hero) in heroes.iter().enumerate() {
            logger::info(
                LogTag::Scraper,
                &format!("Scraping {}/{}: {}", i + 1, heroes.len(), hero.name),
            );
            let skins = self.fetch_hero_skins(hero).await?;
            records.extend(skins);
            progress(i + 1, heroes.len());
        }

        Ok(records)
    }
}

/// Hero entries from the heroes index page
fn parse_heroes(html: &str, base: &Url) -> Vec<Hero> {
    let document = Html::parse_document(html);
    let mut heroes = Vec::new();

    for anchor in document.select(&HERO_LINK_SELECTOR) {
        let name = anchor.text().collect::<String>().trim().to_string();
        let Some(href) = anchor.attr("href") else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let Ok(url) = base.join(href) else {
            continue;
        };
        heroes.push(Hero {
            name,
            url: url.to_string(),
        });
    }

    heroes
}

/// A skin anchor found on a hero page, before its id page is fetched
#[derive(Debug, PartialEq, Eq)]
struct SkinLink {
    name: String,
    url: String,
    is_recolor: bool,
}

/// Skin links from a hero page
///
/// The first `.wds-tab__content` is the catalog tab, later tabs hold
/// recolors. Battle-pass exclusives and Twitch drops are skipped, and a
/// trailing "(Hero Name)" disambiguation is stripped from skin names.
fn parse_skin_links(html: &str, base: &Url, hero_name: &str) -> Vec<SkinLink> {
    let document = Html::parse_document(html);
    let hero_suffix = format!("({})", hero_name);
    let mut links = Vec::new();

    for (tab_idx, tab) in document.select(&TAB_CONTENT_SELECTOR).enumerate() {
        for anchor in tab.select(&SKIN_LINK_SELECTOR) {
            let raw_name = anchor.attr("title").unwrap_or("").trim();
            let Some(href) = anchor.attr("href") else {
                continue;
            };
            if raw_name.is_empty() {
                continue;
            }
            if raw_name.to_lowercase().contains("(battlepass)") || raw_name.contains("Twitch") {
                continue;
            }
            let Ok(url) = base.join(href) else {
                continue;
            };
            let name = raw_name.replace(&hero_suffix, "").trim().to_string();
            links.push(SkinLink {
                name,
                url: url.to_string(),
                is_recolor: tab_idx > 0,
            });
        }
    }

    links
}

/// Skin id from a skin page's rarity table
///
/// Looks for a row whose header cell reads "ID NO." and takes the first
/// data cell in that row holding a plausible all-digit id.
fn parse_skin_id(html: &str) -> Option<u64> {
    let document = Html::parse_document(html);

    for table in document.select(&ID_TABLE_SELECTOR) {
        for row in table.select(&ROW_SELECTOR) {
            let is_id_row = row.select(&HEADER_CELL_SELECTOR).any(|th| {
                let text = th.text().collect::<String>();
                text.contains("ID NO.") || text.contains("ID_NO.")
            });
            if !is_id_row {
                continue;
            }
            for td in row.select(&DATA_CELL_SELECTOR) {
                let text = td.text().collect::<String>().trim().to_string();
                if text.len() >= MIN_ID_DIGITS && text.chars().all(|c| c.is_ascii_digit()) {
                    if let Ok(id) = text.parse::<u64>() {
                        return Some(id);
                    }
                }
            }
        }
    }

    None
}

/// Default-skin id: the hero's 4-digit id prefix followed by "001"
fn default_skin_id(first_skin_id: u64) -> Option<u64> {
    let digits = first_skin_id.to_string();
    if digits.len() < 4 {
        return None;
    }
    format!("{}001", &digits[..4]).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://marvelrivals.fandom.com/wiki").unwrap()
    }

    #[test]
    fn parses_heroes_from_index_page() {
        let html = r#"
            <div class="herocard-link"><a href="/wiki/Magik">Magik</a></div>
            <div class="herocard-link"><a href="/wiki/Adam_Warlock">Adam Warlock</a></div>
            <div class="herocard-link"><a>Nameless</a></div>
        "#;
        let heroes = parse_heroes(html, &base());
        assert_eq!(heroes.len(), 2);
        assert_eq!(heroes[0].name, "Magik");
        assert_eq!(heroes[0].url, "https://marvelrivals.fandom.com/wiki/Magik");
        assert_eq!(heroes[1].name, "Adam Warlock");
    }

    #[test]
    fn parses_skin_links_with_recolor_tabs() {
        let html = r#"
            <div class="wds-tab__content">
              <div class="charcat-wrapper">
                <a href="/wiki/Punk_Rebel" title="Punk Rebel (Magik)"></a>
                <a href="/wiki/Seasonal_(battlepass)" title="Seasonal (Battlepass)"></a>
                <a href="/wiki/Twitch_Drop" title="Twitch Drop"></a>
              </div>
            </div>
            <div class="wds-tab__content">
              <div class="charcat-wrapper">
                <a href="/wiki/Punk_Rebel_Crimson" title="Punk Rebel Crimson"></a>
              </div>
            </div>
        "#;
        let links = parse_skin_links(html, &base(), "Magik");
        assert_eq!(links.len(), 2);

        assert_eq!(links[0].name, "Punk Rebel");
        assert_eq!(
            links[0].url,
            "https://marvelrivals.fandom.com/wiki/Punk_Rebel"
        );
        assert!(!links[0].is_recolor);

        assert_eq!(links[1].name, "Punk Rebel Crimson");
        assert!(links[1].is_recolor);
    }

    #[test]
    fn parses_skin_id_from_rarity_table() {
        let html = r#"
            <table class="char-table-legendary">
              <tr><th>NAME</th><td>Punk Rebel</td></tr>
              <tr><th>ID NO.</th><td>1016200</td></tr>
            </table>
        "#;
        assert_eq!(parse_skin_id(html), Some(1016200));
    }

    #[test]
    fn rejects_short_or_non_numeric_ids() {
        let html = r#"
            <table class="char-table-rare">
              <tr><th>ID NO.</th><td>12345</td></tr>
              <tr><th>ID NO.</th><td>unknown</td></tr>
            </table>
        "#;
        assert_eq!(parse_skin_id(html), None);
    }

    #[test]
    fn ignores_tables_without_rarity_classes() {
        let html = r#"
            <table class="infobox">
              <tr><th>ID NO.</th><td>1016200</td></tr>
            </table>
        "#;
        assert_eq!(parse_skin_id(html), None);
    }

    #[test]
    fn default_id_uses_four_digit_prefix() {
        assert_eq!(default_skin_id(1016200), Some(1016001));
        assert_eq!(default_skin_id(123), None);
    }
}
