use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::LogLevel;

pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Where a log call was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Cow<'static, str>,
    pub function: Cow<'static, str>,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(
        file: impl Into<Cow<'static, str>>,
        function: impl Into<Cow<'static, str>>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            line,
            column,
        }
    }

    /// Location of the caller. The function name is not available this way and is left empty.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), "", location.line(), location.column())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One log call, captured once and shared read-only with every observer.
#[derive(Clone)]
pub struct LogEntry {
    category: String,
    timestamp: DateTime<Utc>,
    level: LogLevel,
    message: String,
    error: Option<SharedError>,
    location: SourceLocation,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        category: impl Into<String>,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            category: category.into(),
            timestamp: Utc::now(),
            level,
            message: message.into(),
            error: None,
            location,
        }
    }

    pub fn with_error(mut self, error: SharedError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.error.as_deref()
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("category", &self.category)
            .field("timestamp", &self.timestamp)
            .field("level", &self.level)
            .field("message", &self.message)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .field("location", &self.location)
            .finish()
    }
}

/// Short type name of `value`: module paths are stripped, generic arguments kept.
pub fn subject_type_name<T: ?Sized>(value: &T) -> String {
    short_type_name(std::any::type_name_of_val(value))
}

pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        match ch {
            ':' => segment.clear(),
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' | '*' => {
                out.push_str(&segment);
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(&segment);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    #[test]
    fn short_type_names() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(
            short_type_name("alloc::vec::Vec<core::option::Option<u8>>"),
            "Vec<Option<u8>>"
        );
        assert_eq!(
            short_type_name("std::collections::hash::map::HashMap<alloc::string::String, i32>"),
            "HashMap<String, i32>"
        );
        assert_eq!(subject_type_name(&Widget), "Widget");
    }

    #[test]
    fn caller_location_points_here() {
        let location = SourceLocation::caller();
        assert!(location.file.ends_with("entry.rs"));
        assert_eq!(location.function, "");
        assert!(location.line > 0);
    }

    #[test]
    fn entry_keeps_error_text() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let entry = LogEntry::new(LogLevel::Error, "store", "write failed", SourceLocation::caller())
            .with_error(Arc::new(io));
        assert_eq!(entry.error().map(|e| e.to_string()), Some("disk gone".to_string()));
        assert_eq!(entry.level(), LogLevel::Error);
        assert_eq!(entry.category(), "store");
    }
}
