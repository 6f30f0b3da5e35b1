/// Log formatting and console output with ANSI colors
///
/// Single-line format: dimmed timestamp, colored tag, colored level,
/// then the message. Output is flushed so lines survive a hard exit.
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, Write};

/// Fixed tag column width for alignment
const TAG_WIDTH: usize = 9;

/// Format and print a single log line
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();

    let tag_padded = format!("{:<width$}", tag.as_str(), width = TAG_WIDTH);
    let tag_str = match tag {
        LogTag::System => tag_padded.cyan().bold(),
        LogTag::Config => tag_padded.blue().bold(),
        LogTag::Cache => tag_padded.green().bold(),
        LogTag::Refresh => tag_padded.magenta().bold(),
        LogTag::Scheduler => tag_padded.yellow().bold(),
        LogTag::Scraper => tag_padded.bright_blue().bold(),
        LogTag::Webserver => tag_padded.bright_green().bold(),
    };

    let level_str = match level {
        LogLevel::Error => level.as_str().red().bold(),
        LogLevel::Warning => level.as_str().yellow().bold(),
        LogLevel::Info => level.as_str().normal(),
        LogLevel::Debug => level.as_str().purple(),
        LogLevel::Verbose => level.as_str().dimmed(),
    };

    let message_str = match level {
        LogLevel::Error => message.red().to_string(),
        LogLevel::Warning => message.yellow().to_string(),
        LogLevel::Verbose => message.dimmed().to_string(),
        _ => message.to_string(),
    };

    println!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        tag_str,
        level_str,
        message_str
    );
    // Ignore broken pipes when output is piped to head/grep
    let _ = stdout().flush();
}
