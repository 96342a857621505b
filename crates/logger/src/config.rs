use crate::{FormatterPreset, LogLevel};

/// Process-wide settings applied to a [`crate::LoggingContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub console_enabled: bool,
    /// Entries below this level are not printed, but still reach observers.
    pub console_threshold: LogLevel,
    pub formatter: FormatterPreset,
    pub deferred_delivery: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            console_threshold: LogLevel::Info,
            formatter: FormatterPreset::Default,
            deferred_delivery: false,
        }
    }
}
