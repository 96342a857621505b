use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::entry::{subject_type_name, SharedError};
use crate::{LogEntry, LogLevel, LogObserver, LoggingContext, ObserverRegistry, SourceLocation};

static NEXT_LOGGER_ID: AtomicU64 = AtomicU64::new(1);

/// Reference identity of a logger. Two loggers sharing a category still have distinct ids.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct LoggerId(u64);

impl fmt::Display for LoggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "logger#{}", self.0)
    }
}

pub(crate) struct LoggerCore {
    id: LoggerId,
    category: String,
    observers: ObserverRegistry,
}

impl LoggerCore {
    pub(crate) fn new(category: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: LoggerId(NEXT_LOGGER_ID.fetch_add(1, Ordering::Relaxed)),
            category: category.into(),
            observers: ObserverRegistry::new(),
        })
    }
}

/// A logging channel: a category plus its own observers, bound to a [`LoggingContext`].
///
/// Cloning yields another handle to the same logger.
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
    context: Arc<LoggingContext>,
}

impl Logger {
    /// Creates a logger bound to the process-wide context.
    pub fn new(category: impl Into<String>) -> Self {
        crate::context().logger(category)
    }

    pub(crate) fn from_parts(core: Arc<LoggerCore>, context: Arc<LoggingContext>) -> Self {
        Self { core, context }
    }

    pub(crate) fn core(&self) -> &Arc<LoggerCore> {
        &self.core
    }

    pub fn id(&self) -> LoggerId {
        self.core.id
    }

    pub fn category(&self) -> &str {
        &self.core.category
    }

    pub fn context(&self) -> &Arc<LoggingContext> {
        &self.context
    }

    /// Observers that only see entries from this logger.
    pub fn observers(&self) -> &ObserverRegistry {
        &self.core.observers
    }

    pub fn add_observer(&self, observer: Arc<dyn LogObserver>) -> bool {
        self.core.observers.add(observer)
    }

    pub fn remove_observer(&self, observer: &Arc<dyn LogObserver>) -> bool {
        self.core.observers.remove(observer)
    }

    /// Starts an entry that can carry an error, a category override, a subject
    /// or an explicit source location before it is emitted.
    #[track_caller]
    pub fn record(&self, level: LogLevel, message: impl Into<String>) -> Record<'_> {
        Record {
            logger: self,
            level,
            message: message.into(),
            error: None,
            category: None,
            subject: None,
            location: SourceLocation::caller(),
        }
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.record(level, message).emit()
    }

    /// Runs an already built entry through the console, this logger's
    /// observers and the shared observers (or the deferred queue).
    pub fn dispatch(&self, entry: LogEntry) {
        self.context.write_console(&entry);
        self.core.observers.broadcast(self, &entry);
        self.context.publish(self, entry);
    }

    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message)
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message)
    }

    #[track_caller]
    pub fn verbose(&self, message: impl Into<String>) {
        self.log(LogLevel::Verbose, message)
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message)
    }

    #[track_caller]
    pub fn status(&self, message: impl Into<String>) {
        self.log(LogLevel::Status, message)
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message)
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message)
    }

    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message)
    }

    #[track_caller]
    pub fn code(&self, message: impl Into<String>) {
        self.log(LogLevel::Code, message)
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.core.id)
            .field("category", &self.core.category)
            .finish()
    }
}

/// Pending log call built by [`Logger::record`].
#[must_use = "a record is only logged once `emit` is called"]
pub struct Record<'a> {
    logger: &'a Logger,
    level: LogLevel,
    message: String,
    error: Option<SharedError>,
    category: Option<String>,
    subject: Option<String>,
    location: SourceLocation,
}

impl Record<'_> {
    pub fn error<E>(self, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.shared_error(Arc::new(error))
    }

    pub fn shared_error(mut self, error: SharedError) -> Self {
        self.error = Some(error);
        self
    }

    /// Overrides the category. Takes precedence over [`Record::subject`].
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Uses the short type name of `subject` as the category, unless one was given explicitly.
    pub fn subject<T: ?Sized>(mut self, subject: &T) -> Self {
        self.subject = Some(subject_type_name(subject));
        self
    }

    pub fn location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn emit(self) {
        let category = self
            .category
            .or(self.subject)
            .unwrap_or_else(|| self.logger.category().to_string());

        let mut entry = LogEntry::new(self.level, category, self.message, self.location);
        if let Some(error) = self.error {
            entry = entry.with_error(error);
        }
        self.logger.dispatch(entry);
    }
}
