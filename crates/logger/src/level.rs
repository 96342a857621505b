use std::fmt::Display;
use std::str::FromStr;

use crate::error::ConfigError;

#[repr(u8)]
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum LogLevel {
    Trace,
    Debug,
    Verbose,
    Info,
    Status,
    Warning,
    Error,
    Critical,
    /// Error in the source code; things that should never happen
    Code,
}

impl LogLevel {
    pub const ALL: [LogLevel; 9] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Verbose,
        LogLevel::Info,
        LogLevel::Status,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Code,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn icon(self) -> &'static str {
        match self {
            LogLevel::Trace => "🔍",
            LogLevel::Debug => "🐜",
            LogLevel::Verbose => "💬",
            LogLevel::Info => "💬",
            LogLevel::Status => "✔️",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❗️",
            LogLevel::Critical => "🔥",
            LogLevel::Code => "🎱",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
            LogLevel::Info => "info",
            LogLevel::Status => "status",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Code => "code",
        }
    }

    /// Icon followed by the level name, e.g. `"⚠️ warning"`.
    pub fn text(self) -> String {
        format!("{} {}", self.icon(), self.name())
    }

    /// Exact, case-sensitive lookup by [`LogLevel::name`].
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.name() == name)
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConfigError::UnknownLevel(s.to_string()))
    }
}
