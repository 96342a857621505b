use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{LogEntry, Logger};

/// Receives every entry dispatched to the registry it is added to.
pub trait LogObserver: Send + Sync {
    fn on_log_event(&self, source: &Logger, entry: &LogEntry);
}

impl<F> LogObserver for F
where
    F: Fn(&Logger, &LogEntry) + Send + Sync,
{
    fn on_log_event(&self, source: &Logger, entry: &LogEntry) {
        self(source, entry)
    }
}

fn identity(observer: &Arc<dyn LogObserver>) -> *const () {
    Arc::as_ptr(observer) as *const ()
}

/// Ordered set of observers. Delivery follows registration order.
///
/// The lock is only held to mutate or snapshot the list, never while an
/// observer runs, so observers may add or remove registrations from inside
/// their own callback.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Mutex<Vec<Arc<dyn LogObserver>>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the observer was already registered.
    pub fn add(&self, observer: Arc<dyn LogObserver>) -> bool {
        let mut observers = self.observers.lock();
        let key = identity(&observer);
        if observers.iter().any(|o| identity(o) == key) {
            return false;
        }
        observers.push(observer);
        true
    }

    /// Returns `false` if the observer was not registered.
    pub fn remove(&self, observer: &Arc<dyn LogObserver>) -> bool {
        let mut observers = self.observers.lock();
        let key = identity(observer);
        let before = observers.len();
        observers.retain(|o| identity(o) != key);
        observers.len() != before
    }

    pub fn contains(&self, observer: &Arc<dyn LogObserver>) -> bool {
        let key = identity(observer);
        self.observers.lock().iter().any(|o| identity(o) == key)
    }

    pub fn len(&self) -> usize {
        self.observers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.lock().is_empty()
    }

    pub fn clear(&self) {
        self.observers.lock().clear();
    }

    /// Delivers `entry` to a snapshot of the current observers on the calling thread.
    /// A panicking observer does not stop delivery to the ones after it.
    pub fn broadcast(&self, source: &Logger, entry: &LogEntry) {
        let snapshot: Vec<Arc<dyn LogObserver>> = self.observers.lock().clone();
        for observer in snapshot {
            let _ = catch_unwind(AssertUnwindSafe(|| observer.on_log_event(source, entry)));
        }
    }
}
