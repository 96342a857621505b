use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::{LogEntry, LogObserver, Logger, LoggerId};

pub type ForwardedEntry = (LoggerId, LogEntry);

/// Forwards every entry it observes into a channel so another thread can
/// drain it (remote telemetry, UI overlays). Entries sent after the receiver
/// is gone are dropped.
pub struct ChannelObserver {
    sender: Sender<ForwardedEntry>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<ForwardedEntry>) -> Self {
        Self { sender }
    }

    pub fn unbounded() -> (Arc<Self>, Receiver<ForwardedEntry>) {
        let (sender, receiver) = unbounded();
        (Arc::new(Self::new(sender)), receiver)
    }
}

impl LogObserver for ChannelObserver {
    fn on_log_event(&self, source: &Logger, entry: &LogEntry) {
        let _ = self.sender.send((source.id(), entry.clone()));
    }
}

#[cfg(feature = "tracing")]
pub use tracing_bridge::{tracing_level, TracingObserver};

#[cfg(feature = "tracing")]
mod tracing_bridge {
    use crate::{LogEntry, LogLevel, LogObserver, Logger};

    pub fn tracing_level(level: LogLevel) -> tracing::Level {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug | LogLevel::Verbose => tracing::Level::DEBUG,
            LogLevel::Info | LogLevel::Status => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error | LogLevel::Critical | LogLevel::Code => tracing::Level::ERROR,
        }
    }

    /// Re-emits observed entries as `tracing` events, at the level given by [`tracing_level`].
    pub struct TracingObserver;

    impl LogObserver for TracingObserver {
        fn on_log_event(&self, source: &Logger, entry: &LogEntry) {
            let location = entry.location();
            let error = entry.error().map(|e| e.to_string());

            macro_rules! emit {
                ($event:ident) => {
                    tracing::$event!(
                        category = entry.category(),
                        logger = source.category(),
                        severity = entry.level().name(),
                        file = %location.file,
                        function = %location.function,
                        line = location.line,
                        error = ?error,
                        "{}",
                        entry.message()
                    )
                };
            }

            match entry.level() {
                LogLevel::Trace => emit!(trace),
                LogLevel::Debug | LogLevel::Verbose => emit!(debug),
                LogLevel::Info | LogLevel::Status => emit!(info),
                LogLevel::Warning => emit!(warn),
                LogLevel::Error | LogLevel::Critical | LogLevel::Code => emit!(error),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use std::fmt;
        use std::sync::Arc;

        use parking_lot::Mutex;
        use tracing::field::{Field, Visit};
        use tracing::span::{Attributes, Id, Record};
        use tracing::{Event, Level, Metadata, Subscriber};

        use super::{tracing_level, TracingObserver};
        use crate::{LogEntry, LogLevel, LogObserver, LoggingContext, SourceLocation};

        #[derive(Default, Debug)]
        struct Captured {
            level: Option<Level>,
            message: String,
            category: String,
            logger: String,
            error: String,
        }

        impl Visit for Captured {
            fn record_str(&mut self, field: &Field, value: &str) {
                match field.name() {
                    "category" => self.category = value.to_string(),
                    "logger" => self.logger = value.to_string(),
                    _ => {}
                }
            }

            fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
                match field.name() {
                    "message" => self.message = format!("{:?}", value),
                    "error" => self.error = format!("{:?}", value),
                    _ => {}
                }
            }
        }

        // Records every event it is handed
        #[derive(Clone, Default)]
        struct CapturingSubscriber {
            events: Arc<Mutex<Vec<Captured>>>,
        }

        impl Subscriber for CapturingSubscriber {
            fn enabled(&self, _: &Metadata<'_>) -> bool {
                true
            }

            fn new_span(&self, _: &Attributes<'_>) -> Id {
                Id::from_u64(1)
            }

            fn record(&self, _: &Id, _: &Record<'_>) {}

            fn record_follows_from(&self, _: &Id, _: &Id) {}

            fn event(&self, event: &Event<'_>) {
                let mut captured = Captured {
                    level: Some(*event.metadata().level()),
                    ..Captured::default()
                };
                event.record(&mut captured);
                self.events.lock().push(captured);
            }

            fn enter(&self, _: &Id) {}

            fn exit(&self, _: &Id) {}
        }

        #[test]
        fn observed_entries_become_tracing_events() {
            let context = LoggingContext::new();
            let source = context.logger("net");
            let location = SourceLocation::new("src/net.rs", "net::dial", 7, 1);
            let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
            let entries = [
                LogEntry::new(LogLevel::Status, "net", "listening", location.clone()),
                LogEntry::new(LogLevel::Critical, "Dialer", "dial failed", location)
                    .with_error(Arc::new(refused)),
            ];

            let subscriber = CapturingSubscriber::default();
            let events = subscriber.events.clone();
            tracing::subscriber::with_default(subscriber, || {
                for entry in &entries {
                    TracingObserver.on_log_event(&source, entry);
                }
            });

            let events = events.lock();
            assert_eq!(events.len(), 2);
            assert_eq!(events[0].level, Some(Level::INFO));
            assert_eq!(events[0].message, "listening");
            assert_eq!(events[0].logger, "net");
            assert_eq!(events[0].error, "None");
            assert_eq!(events[1].level, Some(Level::ERROR));
            assert_eq!(events[1].message, "dial failed");
            assert_eq!(events[1].category, "Dialer");
            assert_eq!(events[1].error, "Some(\"refused\")");
        }

        #[test]
        fn levels_collapse_onto_tracing() {
            assert_eq!(tracing_level(LogLevel::Verbose), tracing::Level::DEBUG);
            assert_eq!(tracing_level(LogLevel::Status), tracing::Level::INFO);
            assert_eq!(tracing_level(LogLevel::Warning), tracing::Level::WARN);
            assert_eq!(tracing_level(LogLevel::Code), tracing::Level::ERROR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogLevel, LoggingContext, NoopLogTarget};

    #[test]
    fn forwards_source_and_entry() {
        let context = LoggingContext::new();
        context.set_console_target(Box::new(NoopLogTarget));
        let (observer, receiver) = ChannelObserver::unbounded();
        context.add_observer(observer);

        let logger = context.logger("net");
        logger.warning("slow handshake");

        let (source, entry) = receiver.try_recv().unwrap();
        assert_eq!(source, logger.id());
        assert_eq!(entry.level(), LogLevel::Warning);
        assert_eq!(entry.message(), "slow handshake");
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let context = LoggingContext::new();
        context.set_console_target(Box::new(NoopLogTarget));
        let (observer, receiver) = ChannelObserver::unbounded();
        drop(receiver);
        context.add_observer(observer);
        context.logger("net").error("nobody listens");
    }
}
