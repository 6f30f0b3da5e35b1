/// Log tags identifying which subsystem produced a message
///
/// Each tag maps to a `--debug-<key>` command-line flag for targeted
/// debug output.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    System,
    Config,
    Cache,
    Refresh,
    Scheduler,
    Scraper,
    Webserver,
}

impl LogTag {
    /// Fixed-width display name for log line alignment
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Cache => "CACHE",
            LogTag::Refresh => "REFRESH",
            LogTag::Scheduler => "SCHEDULER",
            LogTag::Scraper => "SCRAPER",
            LogTag::Webserver => "WEBSERVER",
        }
    }

    /// Key used by the matching --debug-<key> flag
    pub fn to_debug_key(&self) -> &'static str {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Cache => "cache",
            LogTag::Refresh => "refresh",
            LogTag::Scheduler => "scheduler",
            LogTag::Scraper => "scraper",
            LogTag::Webserver => "webserver",
        }
    }
}
