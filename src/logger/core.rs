/// Central logging logic with automatic filtering
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Debug level requires the --debug-<module> flag for that tag
/// 3. Verbose level requires --verbose
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;

/// Check if a log message should be displayed
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    match level {
        LogLevel::Error | LogLevel::Warning | LogLevel::Info => true,
        LogLevel::Debug => {
            arguments::is_verbose_enabled()
                || arguments::has_arg(&format!("--debug-{}", tag.to_debug_key()))
        }
        LogLevel::Verbose => arguments::is_verbose_enabled(),
    }
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }
    super::format::format_and_log(tag, level, message);
}
