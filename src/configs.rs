/// Runtime configuration loaded from configs.json
///
/// Every field has a default so a missing file or a partial file still
/// produces a working configuration. The file is read once at startup.
use crate::arguments;
use crate::logger::{self, LogTag};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Path of the configuration file, relative to the working directory
pub const CONFIGS_PATH: &str = "configs.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configs {
    /// Address the webserver binds to
    pub host: String,
    pub port: u16,
    /// Base wiki URL, without a trailing slash
    pub wiki_base_url: String,
    /// Interval between scheduled cache refreshes
    pub refresh_interval_hours: u64,
    /// Upper bound for one full scrape cycle
    pub scrape_timeout_secs: u64,
    /// Per-page HTTP request timeout
    pub request_timeout_secs: u64,
    /// Kick off a scrape at startup when the cache is empty
    pub refresh_on_startup: bool,
}

impl Default for Configs {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            wiki_base_url: "https://marvelrivals.fandom.com/wiki".to_string(),
            refresh_interval_hours: 12,
            scrape_timeout_secs: 30 * 60,
            request_timeout_secs: 10,
            refresh_on_startup: true,
        }
    }
}

/// Reads a configs file, falling back to defaults when it does not exist
pub fn read_configs<P: AsRef<Path>>(path: P) -> anyhow::Result<Configs> {
    if !path.as_ref().exists() {
        return Ok(Configs::default());
    }
    let data = fs::read_to_string(&path)?;
    let configs: Configs = serde_json::from_str(&data)?;
    Ok(configs)
}

/// Global configuration instance
///
/// Falls back to defaults (with a logged warning) when configs.json is
/// malformed. `--port` on the command line overrides the file value.
pub static CONFIGS: Lazy<Configs> = Lazy::new(|| {
    let mut configs = match read_configs(CONFIGS_PATH) {
        Ok(configs) => configs,
        Err(e) => {
            logger::warning(
                LogTag::Config,
                &format!("Failed to read {}: {} (using defaults)", CONFIGS_PATH, e),
            );
            Configs::default()
        }
    };

    if let Some(port) = arguments::get_arg_value("--port") {
        match port.parse::<u16>() {
            Ok(port) => configs.port = port,
            Err(_) => logger::warning(
                LogTag::Config,
                &format!("Ignoring invalid --port value '{}'", port),
            ),
        }
    }

    configs
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let configs = read_configs("does_not_exist.json").unwrap();
        assert_eq!(configs.port, 8080);
        assert_eq!(configs.refresh_interval_hours, 12);
        assert!(configs.refresh_on_startup);
    }

    #[test]
    fn partial_file_fills_remaining_fields() {
        let configs: Configs = serde_json::from_str(r#"{ "port": 9000 }"#).unwrap();
        assert_eq!(configs.port, 9000);
        assert_eq!(configs.host, "127.0.0.1");
        assert_eq!(configs.request_timeout_secs, 10);
    }
}
