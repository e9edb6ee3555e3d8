//! Zero-payload publish/subscribe signal.
//!
//! Used as a "something changed" wake-up between a producer (a successful
//! submission) and consumers (views that re-fetch their own state). There is
//! no queue: a signal emitted while nobody is subscribed is lost, so consumers
//! must load current state on activation instead of relying on replay.
//!
//! One instance is created at startup and cloned into every producer and
//! consumer; clones share the same subscriber set.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Handler = dyn Fn() + Send + Sync;

struct Entry {
    id: u64,
    alive: AtomicBool,
    handler: Box<Handler>,
}

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    entries: Mutex<Vec<Arc<Entry>>>,
}

impl Registry {
    fn entries(&self) -> MutexGuard<'_, Vec<Arc<Entry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: u64) {
        self.entries().retain(|e| e.id != id);
    }
}

/// Handle to the shared subscriber set. Cheap to clone.
#[derive(Clone, Default)]
pub struct NotificationChannel {
    registry: Arc<Registry>,
}

impl fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl NotificationChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`. It stays registered until the returned
    /// [`Subscription`] is unsubscribed or dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, handler: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let entry = Arc::new(Entry { id, alive: AtomicBool::new(true), handler: Box::new(handler) });
        self.registry.entries().push(Arc::clone(&entry));
        tracing::debug!(subscription = id, "notification subscriber registered");
        Subscription { entry: Some(entry), registry: Arc::downgrade(&self.registry) }
    }

    /// Invoke every current subscriber synchronously, in subscription order.
    ///
    /// Returns the number of handlers invoked. Handlers may subscribe or
    /// unsubscribe from inside the call; the set is snapshotted first and
    /// entries unsubscribed mid-emission are skipped.
    pub fn emit(&self) -> usize {
        let snapshot: Vec<Arc<Entry>> = self.registry.entries().clone();
        let mut delivered = 0;
        for entry in snapshot {
            if entry.alive.load(Ordering::Acquire) {
                (entry.handler)();
                delivered += 1;
            }
        }
        tracing::debug!(delivered, "notification emitted");
        delivered
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.entries().len()
    }
}

/// Registration token. Unsubscribes on [`Subscription::unsubscribe`] or drop.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    entry: Option<Arc<Entry>>,
    registry: Weak<Registry>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.entry.as_ref().map(|e| e.id)).finish()
    }
}

impl Subscription {
    /// Deregister the handler. After this returns the handler is never invoked again.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(entry) = self.entry.take() else {
            return;
        };
        entry.alive.store(false, Ordering::Release);
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(entry.id);
        }
        tracing::debug!(subscription = entry.id, "notification subscriber removed");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
