use std::sync::Arc;
use std::time::Duration;

use rivalskins::{
    arguments,
    cache::CacheStore,
    configs::CONFIGS,
    logger::{self, LogTag},
    query::QueryService,
    refresh::{RefreshCoordinator, RefreshScheduler},
    scrape::WikiScraper,
    webserver::{self, state::AppState},
};

/// Main entry point
///
/// Wires the application root: one cache store, one scrape provider, one
/// refresh coordinator, a periodic scheduler, and the webserver. Starts
/// an initial scrape when configured (the in-memory cache is always
/// empty after a restart), then serves until Ctrl-C.
#[tokio::main]
async fn main() {
    logger::init();

    if arguments::is_help_requested() {
        arguments::print_help();
        return;
    }

    logger::info(LogTag::System, "rivalskins starting up...");

    let store = Arc::new(CacheStore::new());
    let provider = match WikiScraper::new(
        &CONFIGS.wiki_base_url,
        Duration::from_secs(CONFIGS.request_timeout_secs),
    ) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            logger::error(LogTag::System, &format!("Failed to set up scraper: {}", e));
            std::process::exit(1);
        }
    };

    let coordinator = RefreshCoordinator::new(
        Arc::clone(&store),
        provider,
        Duration::from_secs(CONFIGS.scrape_timeout_secs),
    );

    let scheduler = RefreshScheduler::new(
        Arc::clone(&coordinator),
        Duration::from_secs(CONFIGS.refresh_interval_hours * 60 * 60),
    );
    scheduler.start();

    // Restart always loses the cache; populate it right away unless
    // disabled
    if CONFIGS.refresh_on_startup && !arguments::has_arg("--no-initial-refresh") {
        logger::info(LogTag::System, "Cache is empty, starting initial refresh");
        coordinator.trigger();
    }

    if let Err(e) = ctrlc::set_handler(|| {
        webserver::shutdown();
    }) {
        logger::warning(
            LogTag::System,
            &format!("Could not install Ctrl-C handler: {}", e),
        );
    }

    let state = Arc::new(AppState::new(
        QueryService::new(Arc::clone(&store)),
        Arc::clone(&coordinator),
        Arc::clone(&scheduler),
    ));

    if let Err(e) = webserver::start_server(state).await {
        logger::error(LogTag::System, &e);
        std::process::exit(1);
    }
}
