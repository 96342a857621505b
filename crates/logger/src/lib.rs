//! Leveled logging facade with pluggable observers.
//!
//! Every log call builds one [`LogEntry`], prints it to the console when it
//! meets the console threshold, then hands it to the logger's own observers
//! and to the observers shared by the whole [`LoggingContext`]. While
//! deferred delivery is on, the shared observers only see queued entries once
//! the mode is switched off again.

mod config;
mod context;
mod entry;
mod error;
mod formatter;
mod level;
mod logger;
mod logger_macro;
mod observer;
mod queue;
mod sinks;
mod targets;

pub use config::LoggingConfig;
pub use context::{LoggingContext, DEFAULT_CATEGORY, FLUSH_NOTICE};
pub use entry::{subject_type_name, LogEntry, SharedError, SourceLocation};
pub use error::ConfigError;
pub use formatter::{
    compact_formatter, default_formatter, format_date, pad, verbose_formatter, Formatter,
    FormatterPreset,
};
pub use level::LogLevel;
pub use logger::{Logger, LoggerId, Record};
pub use observer::{LogObserver, ObserverRegistry};
pub use queue::{DeliveryQueue, Flush};
pub use sinks::{ChannelObserver, ForwardedEntry};
#[cfg(feature = "tracing")]
pub use sinks::{tracing_level, TracingObserver};
pub use targets::{ConsoleLogTarget, LogTarget, NoopLogTarget};

use std::sync::{Arc, LazyLock};

static CONTEXT: LazyLock<Arc<LoggingContext>> = LazyLock::new(LoggingContext::new);

/// The process-wide context used by [`Logger::new`] and the logging macros.
pub fn context() -> Arc<LoggingContext> {
    CONTEXT.clone()
}

pub fn default_logger() -> Logger {
    CONTEXT.default_logger()
}

pub fn logger(category: impl Into<String>) -> Logger {
    CONTEXT.logger(category)
}

pub fn configure(config: &LoggingConfig) {
    CONTEXT.apply(config);
}

pub fn add_observer(observer: Arc<dyn LogObserver>) -> bool {
    CONTEXT.add_observer(observer)
}

pub fn remove_observer(observer: &Arc<dyn LogObserver>) -> bool {
    CONTEXT.remove_observer(observer)
}

pub fn set_console_logging(enabled: bool) {
    CONTEXT.set_console_logging(enabled);
}

pub fn console_logging_enabled() -> bool {
    CONTEXT.console_logging_enabled()
}

pub fn set_console_threshold(level: LogLevel) {
    CONTEXT.set_console_threshold(level);
}

pub fn console_threshold() -> LogLevel {
    CONTEXT.console_threshold()
}

pub fn set_formatter(formatter: Formatter) {
    CONTEXT.set_formatter(formatter);
}

pub fn set_console_target(target: Box<dyn LogTarget + Send + Sync>) {
    CONTEXT.set_console_target(target);
}

pub fn set_deferred_delivery(deferred: bool) {
    CONTEXT.set_deferred_delivery(deferred);
}

pub fn deferred_delivery() -> bool {
    CONTEXT.deferred_delivery()
}
