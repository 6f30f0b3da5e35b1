//! Structured logging for rivalskins
//!
//! Clean, ergonomic logging API:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Colored console output
//!
//! ## Usage
//!
//! ```rust
//! use rivalskins::logger::{self, LogTag};
//!
//! logger::info(LogTag::Refresh, "Refresh started");
//! logger::debug(LogTag::Scraper, "GET /wiki/Heroes"); // only with --debug-scraper
//! ```

mod core;
mod format;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Call once at startup before any logging occurs. Prints which debug
/// modes are active so misspelled flags are easy to spot.
pub fn init() {
    crate::arguments::print_debug_info();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (requires --debug-<module> for the tag)
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (requires --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
