use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{ConfigError, LogEntry};

/// Renders one entry as a single console line.
pub type Formatter = Arc<dyn Fn(&LogEntry) -> String + Send + Sync + 'static>;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const COMPACT_DATE_FORMAT: &str = "%M:%S";

const CATEGORY_WIDTH: usize = 15;
const LEVEL_WIDTH: usize = 11;
const ICON_WIDTH: usize = 2;

#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub enum FormatterPreset {
    #[default]
    Default,
    Compact,
    Verbose,
}

impl FormatterPreset {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::Default),
            "compact" => Some(Self::Compact),
            "verbose" => Some(Self::Verbose),
            _ => None,
        }
    }

    pub fn formatter(self) -> Formatter {
        match self {
            Self::Default => Arc::new(default_formatter),
            Self::Compact => Arc::new(compact_formatter),
            Self::Verbose => Arc::new(verbose_formatter),
        }
    }
}

impl FromStr for FormatterPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConfigError::UnknownFormatter(s.to_string()))
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Truncates or right-pads `text` with spaces to exactly `width` UTF-16 code
/// units. A character outside the Basic Multilingual Plane counts as two and
/// is dropped whole when only one unit is left.
pub fn pad(text: &str, width: usize) -> String {
    let mut padded = String::with_capacity(width);
    let mut units = 0;
    for c in text.chars() {
        if units + c.len_utf16() > width {
            break;
        }
        units += c.len_utf16();
        padded.push(c);
    }
    padded.extend(std::iter::repeat(' ').take(width - units));
    padded
}

fn bracketed_error(entry: &LogEntry) -> String {
    match entry.error() {
        Some(error) => format!(" [{}]", error),
        None => String::new(),
    }
}

fn leveled_prefix(entry: &LogEntry) -> String {
    format!(
        "{} | {} | {}",
        format_date(entry.timestamp()),
        pad(entry.category(), CATEGORY_WIDTH),
        pad(&entry.level().text(), LEVEL_WIDTH)
    )
}

pub fn default_formatter(entry: &LogEntry) -> String {
    format!("{} | {}{}", leveled_prefix(entry), entry.message(), bracketed_error(entry))
}

pub fn compact_formatter(entry: &LogEntry) -> String {
    format!(
        "{} {} {}{}",
        entry.timestamp().format(COMPACT_DATE_FORMAT),
        pad(entry.level().icon(), ICON_WIDTH),
        entry.message(),
        bracketed_error(entry)
    )
}

pub fn verbose_formatter(entry: &LogEntry) -> String {
    let error = match entry.error() {
        Some(error) => format!(" {}", error),
        None => String::new(),
    };
    format!(
        "{} | {} [{} line {}{}]",
        leveled_prefix(entry),
        entry.message(),
        entry.location().function,
        entry.location().line,
        error
    )
}
