//! Single publication point for timer snapshots

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::trace;

use super::TimerState;

/// Buffered snapshots per observer before it starts lagging
const OBSERVER_CAPACITY: usize = 128;

#[derive(Debug)]
struct Published {
    snapshot: TimerState,
    tx: broadcast::Sender<TimerState>,
}

/// Holds the authoritative snapshot and fans every replacement out to observers.
///
/// Replacing the snapshot and broadcasting it happen under one lock, so a new
/// subscriber either sees a change in its initial snapshot or receives it on
/// its channel, never both and never neither.
#[derive(Debug)]
pub struct TimerChannel {
    published: Mutex<Published>,
}

impl TimerChannel {
    pub fn new(initial: TimerState) -> Self {
        let (tx, _) = broadcast::channel(OBSERVER_CAPACITY);
        Self {
            published: Mutex::new(Published {
                snapshot: initial,
                tx,
            }),
        }
    }

    // Snapshots are Copy and only ever replaced whole, so a poisoned lock
    // still guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, Published> {
        self.published.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Latest snapshot
    pub fn current(&self) -> TimerState {
        self.lock().snapshot
    }

    /// Replace the snapshot with `next` and notify observers
    pub fn publish(&self, next: TimerState) {
        self.update(|_| next);
    }

    /// Atomically derive the next snapshot from the current one and publish it
    pub fn update<F>(&self, f: F) -> TimerState
    where
        F: FnOnce(TimerState) -> TimerState,
    {
        let mut published = self.lock();
        let next = f(published.snapshot);
        debug_assert!(
            !(next.remaining_ms == 0 && next.running),
            "expired timer published as running"
        );
        published.snapshot = next;
        if published.tx.send(next).is_err() {
            trace!("No timer observers subscribed");
        }
        next
    }

    /// Current snapshot plus a receiver for every later change
    pub fn subscribe(&self) -> (TimerState, broadcast::Receiver<TimerState>) {
        let published = self.lock();
        (published.snapshot, published.tx.subscribe())
    }
}
