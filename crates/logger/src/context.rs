use std::io::{self, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logger::LoggerCore;
use crate::queue::{DeliveryQueue, Flush};
use crate::{
    ConsoleLogTarget, Formatter, FormatterPreset, LogEntry, LogLevel, LogObserver, LogTarget,
    Logger, LoggingConfig, ObserverRegistry, SourceLocation,
};

pub const DEFAULT_CATEGORY: &str = "default";

/// Message of the debug entry logged when queued entries are flushed.
pub const FLUSH_NOTICE: &str = "Flushing queued log entries";

type QueuedEntry = (Arc<LoggerCore>, LogEntry);

/// Process-wide logging state: console settings, the shared observer
/// registry and the deferred-delivery queue.
///
/// The crate keeps one instance behind [`crate::context`]; tests and embedders
/// can build their own with [`LoggingContext::new`].
pub struct LoggingContext {
    console_enabled: AtomicBool,
    console_threshold: AtomicU8,
    formatter: RwLock<Formatter>,
    console_target: RwLock<Box<dyn LogTarget + Send + Sync>>,
    observers: ObserverRegistry,
    queue: DeliveryQueue<QueuedEntry>,
    default_core: Arc<LoggerCore>,
}

impl LoggingContext {
    pub fn new() -> Arc<Self> {
        let defaults = LoggingConfig::default();
        Arc::new(Self {
            console_enabled: AtomicBool::new(defaults.console_enabled),
            console_threshold: AtomicU8::new(defaults.console_threshold.ordinal()),
            formatter: RwLock::new(defaults.formatter.formatter()),
            console_target: RwLock::new(Box::new(ConsoleLogTarget)),
            observers: ObserverRegistry::new(),
            queue: DeliveryQueue::new(),
            default_core: LoggerCore::new(DEFAULT_CATEGORY),
        })
    }

    pub fn with_config(config: &LoggingConfig) -> Arc<Self> {
        let context = Self::new();
        context.apply(config);
        context
    }

    pub fn apply(self: &Arc<Self>, config: &LoggingConfig) {
        self.set_console_logging(config.console_enabled);
        self.set_console_threshold(config.console_threshold);
        self.set_formatter_preset(config.formatter);
        self.set_deferred_delivery(config.deferred_delivery);
    }

    pub fn logger(self: &Arc<Self>, category: impl Into<String>) -> Logger {
        Logger::from_parts(LoggerCore::new(category), self.clone())
    }

    /// The distinguished "default" logger. Every call returns the same identity.
    pub fn default_logger(self: &Arc<Self>) -> Logger {
        Logger::from_parts(self.default_core.clone(), self.clone())
    }

    /// Observers that receive entries from every logger bound to this context.
    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    pub fn add_observer(&self, observer: Arc<dyn LogObserver>) -> bool {
        self.observers.add(observer)
    }

    pub fn remove_observer(&self, observer: &Arc<dyn LogObserver>) -> bool {
        self.observers.remove(observer)
    }

    pub fn console_logging_enabled(&self) -> bool {
        self.console_enabled.load(Ordering::Acquire)
    }

    pub fn set_console_logging(&self, enabled: bool) {
        self.console_enabled.store(enabled, Ordering::Release);
    }

    pub fn console_threshold(&self) -> LogLevel {
        LogLevel::from_ordinal(self.console_threshold.load(Ordering::Acquire)).unwrap_or(LogLevel::Info)
    }

    pub fn set_console_threshold(&self, level: LogLevel) {
        self.console_threshold.store(level.ordinal(), Ordering::Release);
    }

    pub fn formatter(&self) -> Formatter {
        self.formatter.read().clone()
    }

    /// Replaces the active formatter. Entries already written are unaffected.
    pub fn set_formatter(&self, formatter: Formatter) {
        *self.formatter.write() = formatter;
    }

    pub fn set_formatter_preset(&self, preset: FormatterPreset) {
        self.set_formatter(preset.formatter());
    }

    pub fn set_console_target(&self, target: Box<dyn LogTarget + Send + Sync>) {
        *self.console_target.write() = target;
    }

    pub fn deferred_delivery(&self) -> bool {
        self.queue.is_deferred()
    }

    /// Number of entries waiting for the next flush.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Turns deferred delivery on or off.
    ///
    /// Turning it off with entries pending logs a debug notice through the
    /// default logger, then hands every queued entry to the shared observers in
    /// arrival order, each attributed to the logger that produced it. If
    /// another flush is still delivering, the snapshot is appended behind it
    /// and delivered by that flush.
    pub fn set_deferred_delivery(self: &Arc<Self>, deferred: bool) {
        if deferred {
            self.queue.defer();
            return;
        }

        let notice = LogEntry::new(
            LogLevel::Debug,
            DEFAULT_CATEGORY,
            FLUSH_NOTICE,
            SourceLocation::new(file!(), module_path!(), line!(), column!()),
        );
        let batch = match self.queue.resume(|| (self.default_core.clone(), notice.clone())) {
            Flush::Empty => return,
            Flush::Joined => None,
            Flush::Deliver(batch) => Some(batch),
        };

        // The notice reaches the shared observers at the head of its batch.
        let default_logger = self.default_logger();
        self.write_console(&notice);
        default_logger.observers().broadcast(&default_logger, &notice);

        let mut next = batch;
        while let Some(batch) = next {
            for (core, entry) in batch {
                let source = Logger::from_parts(core, self.clone());
                self.observers.broadcast(&source, &entry);
            }
            next = self.queue.next_batch();
        }
    }

    pub(crate) fn write_console(&self, entry: &LogEntry) {
        if !self.console_logging_enabled() || entry.level() < self.console_threshold() {
            return;
        }

        let formatter = self.formatter();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let line = formatter(entry);
            self.console_target.read_recursive().write_line(&line)
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                let _ = writeln!(io::stderr(), "Failed to write log line: {}", err);
            }
            Err(_) => {
                let _ = writeln!(io::stderr(), "Log formatter or console target panicked");
            }
        }
    }

    pub(crate) fn publish(&self, source: &Logger, entry: LogEntry) {
        if let Some((_, entry)) = self.queue.enqueue_if_deferred((source.core().clone(), entry)) {
            self.observers.broadcast(source, &entry);
        }
    }
}
