// ── Event snapshot store ──
//
// Concurrency-safe holder for the most recently retrieved feed
// snapshot. A writer replaces the snapshot wholesale under the write
// lock; readers clone the Arc under the read lock, so iteration happens
// on an immutable snapshot without holding the lock. The lock is never
// held across an await point.

use std::sync::{Arc, RwLock};

use airfeed_api::RemoteEvent;

/// Shared holder for the current event snapshot.
#[derive(Debug, Default)]
pub struct EventStore {
    snapshot: RwLock<Arc<Vec<RemoteEvent>>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot wholesale.
    ///
    /// Atomic with respect to all readers: no reader ever observes a
    /// partially written snapshot.
    pub fn replace(&self, events: Vec<RemoteEvent>) {
        *self.snapshot.write().expect("event store lock poisoned") = Arc::new(events);
    }

    /// The current snapshot.
    ///
    /// Concurrent readers do not block each other; a snapshot taken
    /// before a `replace` keeps observing the old data.
    pub fn snapshot(&self) -> Arc<Vec<RemoteEvent>> {
        Arc::clone(&self.snapshot.read().expect("event store lock poisoned"))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
