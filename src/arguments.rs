/// Centralized argument handling
///
/// Consolidates command-line argument parsing and debug flag checking so
/// the rest of the codebase never touches `std::env::args` directly.
///
/// Features:
/// - Thread-safe CMD_ARGS storage (overridable from tests)
/// - Debug flag predicates for each module (--debug-<module>)
/// - Simple flag/value lookup helpers
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        // Fallback to env::args if the mutex is poisoned
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// Scraper module debug mode (per-page fetch details)
pub fn is_debug_scraper_enabled() -> bool {
    has_arg("--debug-scraper")
}

/// Refresh coordinator debug mode (state transitions, progress)
pub fn is_debug_refresh_enabled() -> bool {
    has_arg("--debug-refresh")
}

/// Webserver debug mode (per-request logging)
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// Cache debug mode (snapshot builds, index details)
pub fn is_debug_cache_enabled() -> bool {
    has_arg("--debug-cache")
}

/// Scheduler debug mode (tick logging)
pub fn is_debug_scheduler_enabled() -> bool {
    has_arg("--debug-scheduler")
}

/// Global verbose mode
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

/// Help requested via -h / --help
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Print usage information
pub fn print_help() {
    println!("rivalskins - Marvel Rivals skin cache API");
    println!();
    println!("USAGE:");
    println!("  rivalskins [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --port <PORT>          Override the webserver port from configs.json");
    println!("  --no-initial-refresh   Skip the scrape normally started on an empty cache");
    println!("  --verbose              Show verbose log output");
    println!("  --debug-scraper        Debug logging for wiki page fetching/parsing");
    println!("  --debug-refresh        Debug logging for the refresh coordinator");
    println!("  --debug-scheduler      Debug logging for the periodic scheduler");
    println!("  --debug-webserver      Debug logging for HTTP request handling");
    println!("  --debug-cache          Debug logging for snapshot builds");
    println!("  -h, --help             Show this help text");
}

/// Print which debug modes are active at startup
pub fn print_debug_info() {
    let mut active = Vec::new();
    if is_debug_scraper_enabled() {
        active.push("scraper");
    }
    if is_debug_refresh_enabled() {
        active.push("refresh");
    }
    if is_debug_scheduler_enabled() {
        active.push("scheduler");
    }
    if is_debug_webserver_enabled() {
        active.push("webserver");
    }
    if is_debug_cache_enabled() {
        active.push("cache");
    }
    if !active.is_empty() {
        println!("Debug modes enabled: {}", active.join(", "));
    }
}
