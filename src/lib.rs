pub mod arguments;
pub mod cache;
pub mod configs;
pub mod errors;
pub mod logger;
pub mod query;
pub mod refresh;
pub mod scrape;
pub mod skins;
pub mod webserver;
