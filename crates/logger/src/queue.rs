use parking_lot::Mutex;

struct QueueState<T> {
    deferred: bool,
    pending: Vec<T>,
    flushing: bool,
    handoff: Vec<T>,
}

/// Outcome of leaving deferred mode.
#[derive(Debug, PartialEq, Eq)]
pub enum Flush<T> {
    /// Nothing was pending.
    Empty,
    /// A flush already running on another call delivers these items after its own.
    Joined,
    /// The caller delivers this batch, then drains [`DeliveryQueue::next_batch`]
    /// until it returns `None`.
    Deliver(Vec<T>),
}

/// Buffer used while deferred delivery is on.
///
/// The mode flag and the pending items share one lock: an item is either
/// queued before a flush takes its snapshot or handed back for live delivery
/// after it, never both and never neither.
///
/// Only one caller delivers at a time. Items that become deliverable while a
/// flush is running, whether a later snapshot or a live item, go to a handoff
/// list the running flush drains before it finishes.
pub struct DeliveryQueue<T> {
    state: Mutex<QueueState<T>>,
}

impl<T> Default for DeliveryQueue<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(QueueState {
                deferred: false,
                pending: Vec::new(),
                flushing: false,
                handoff: Vec::new(),
            }),
        }
    }
}

impl<T> DeliveryQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_deferred(&self) -> bool {
        self.state.lock().deferred
    }

    /// Items waiting for the next flush.
    pub fn len(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().pending.is_empty()
    }

    /// Queues `item` when deferred, or behind a running flush. Otherwise hands
    /// it back for immediate delivery.
    pub fn enqueue_if_deferred(&self, item: T) -> Option<T> {
        let mut state = self.state.lock();
        if state.deferred {
            state.pending.push(item);
            None
        } else if state.flushing {
            state.handoff.push(item);
            None
        } else {
            Some(item)
        }
    }

    /// Switches to deferred mode. Already pending items stay queued.
    pub fn defer(&self) {
        self.state.lock().deferred = true;
    }

    /// Leaves deferred mode. When items are pending, `head` builds an item
    /// placed in front of them, and the whole snapshot is taken in the same
    /// critical section as the flag change.
    pub fn resume(&self, head: impl FnOnce() -> T) -> Flush<T> {
        let mut state = self.state.lock();
        state.deferred = false;
        if state.pending.is_empty() {
            return Flush::Empty;
        }

        let mut batch = Vec::with_capacity(state.pending.len() + 1);
        batch.push(head());
        batch.append(&mut state.pending);

        if state.flushing {
            state.handoff.append(&mut batch);
            Flush::Joined
        } else {
            state.flushing = true;
            Flush::Deliver(batch)
        }
    }

    /// Takes whatever was handed off during the last batch. Returns `None`,
    /// and ends the flush, once nothing is left.
    pub fn next_batch(&self) -> Option<Vec<T>> {
        let mut state = self.state.lock();
        if state.handoff.is_empty() {
            state.flushing = false;
            None
        } else {
            Some(std::mem::take(&mut state.handoff))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DeliveryQueue, Flush};

    #[test]
    fn live_mode_hands_items_back() {
        let queue = DeliveryQueue::new();
        assert_eq!(queue.enqueue_if_deferred(1), Some(1));
        assert!(queue.is_empty());
    }

    #[test]
    fn deferred_items_flush_in_order_once() {
        let queue = DeliveryQueue::new();
        queue.defer();
        for i in 1..5 {
            assert_eq!(queue.enqueue_if_deferred(i), None);
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.resume(|| 0), Flush::Deliver(vec![0, 1, 2, 3, 4]));
        assert_eq!(queue.next_batch(), None);
        assert_eq!(queue.resume(|| 0), Flush::Empty);
        assert_eq!(queue.enqueue_if_deferred(9), Some(9));
    }

    #[test]
    fn re_entering_deferred_mode_keeps_pending() {
        let queue = DeliveryQueue::new();
        queue.defer();
        queue.enqueue_if_deferred("a");
        queue.defer();
        queue.enqueue_if_deferred("b");
        assert!(queue.is_deferred());
        assert_eq!(queue.resume(|| "notice"), Flush::Deliver(vec!["notice", "a", "b"]));
        assert!(!queue.is_deferred());
    }

    #[test]
    fn later_snapshot_joins_running_flush() {
        let queue = DeliveryQueue::new();
        queue.defer();
        queue.enqueue_if_deferred("a");
        assert_eq!(queue.resume(|| "first"), Flush::Deliver(vec!["first", "a"]));

        // Still delivering "a": a live item and a second snapshot line up behind it.
        assert_eq!(queue.enqueue_if_deferred("live"), None);
        queue.defer();
        queue.enqueue_if_deferred("y");
        assert_eq!(queue.resume(|| "second"), Flush::Joined);

        assert_eq!(queue.next_batch(), Some(vec!["live", "second", "y"]));
        assert_eq!(queue.next_batch(), None);
        assert_eq!(queue.enqueue_if_deferred("after"), Some("after"));
    }
}
