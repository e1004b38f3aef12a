//! One-shot, cancellable, keyed timers for Cherry Pick.
//!
//! A [`TimerSet`] arms at most one timer per key. When a timer expires its
//! event is pushed into an mpsc channel, so it arrives in the owner's
//! event loop like any other input and is processed in order with client
//! actions. Re-arming a key replaces the pending timer; cancelling drops it.
//!
//! # Integration
//!
//! The set sits next to the state it drives, inside a single task:
//!
//! ```ignore
//! let (tx, mut rx) = mpsc::unbounded_channel();
//! let mut timers = TimerSet::new(tx.clone());
//! loop {
//!     match rx.recv().await {
//!         Some(Event::RevealElapsed { room_id, round }) => {
//!             timers.fired(&room_id);
//!             /* advance the room */
//!         }
//!         /* ... */
//!     }
//! }
//! ```
//!
//! An expiry can race a cancel: the event may already sit in the channel
//! when [`TimerSet::cancel`] runs. Events must carry enough context (a
//! round number, say) for the receiver to recognise and drop stale ones.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Keyed one-shot timers that deliver events into an mpsc channel.
///
/// Must be used from within a Tokio runtime. Dropping the set aborts
/// every pending timer.
pub struct TimerSet<K, E> {
    tx: mpsc::UnboundedSender<E>,
    pending: HashMap<K, JoinHandle<()>>,
}

impl<K, E> TimerSet<K, E>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    E: Send + 'static,
{
    /// Creates an empty set delivering into `tx`.
    pub fn new(tx: mpsc::UnboundedSender<E>) -> Self {
        Self {
            tx,
            pending: HashMap::new(),
        }
    }

    /// Arms a timer that sends `event` after `delay`.
    ///
    /// A timer already pending for `key` is aborted first.
    pub fn schedule(&mut self, key: K, delay: Duration, event: E) {
        self.pending.retain(|_, handle| !handle.is_finished());

        let tx = self.tx.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(key = ?task_key, "timer expired");
            if tx.send(event).is_err() {
                warn!(key = ?task_key, "timer expired after its receiver closed");
            }
        });

        if let Some(previous) = self.pending.insert(key.clone(), handle) {
            previous.abort();
            debug!(?key, "pending timer replaced");
        }
        debug!(?key, delay_ms = delay.as_millis() as u64, "timer armed");
    }

    /// Aborts the timer for `key`. Returns whether one was still pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.pending.remove(key) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!(?key, "timer cancelled");
                true
            }
            _ => false,
        }
    }

    /// Forgets the handle of a timer whose event has been received.
    pub fn fired(&mut self, key: &K) {
        self.pending.remove(key);
    }

    /// Aborts everything.
    pub fn cancel_all(&mut self) {
        let count = self.pending.len();
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
        if count > 0 {
            debug!(count, "all timers cancelled");
        }
    }

    /// Whether a timer for `key` is armed and has not expired yet.
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of timers that have not expired yet.
    pub fn len(&self) -> usize {
        self.pending
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, E> Drop for TimerSet<K, E> {
    fn drop(&mut self) {
        for handle in self.pending.values() {
            handle.abort();
        }
    }
}
