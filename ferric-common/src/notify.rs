//! Synchronous callback hub for state-change notification.
//!
//! Both the playback engine and the glitch controller publish through a
//! [`Listeners`] registry: callbacks run synchronously in registration order,
//! each invocation is unwind-isolated so one panicking subscriber cannot
//! suppress the rest, and [`Subscription`] guards unsubscribe on drop.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::error;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Ordered collection of notification callbacks.
pub struct Listeners<T> {
    entries: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: AtomicU64,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a callback, returning a guard that unsubscribes on drop.
    ///
    /// Requires `Arc<Self>` so the guard can reach back into the registry
    /// without keeping it alive.
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().unwrap().push((id, Arc::new(callback)));
        Subscription {
            id,
            hub: Arc::downgrade(self),
            active: true,
        }
    }

    /// Invoke every registered callback with `value`, in registration order.
    ///
    /// A panic inside one callback is caught and logged; remaining callbacks
    /// still run. Callbacks execute outside the registry lock, so a callback
    /// may itself subscribe or unsubscribe.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Callback<T>)> = self.entries.lock().unwrap().clone();
        for (id, callback) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| callback(value))).is_err() {
                error!(subscriber_id = id, "notification callback panicked");
            }
        }
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of active registrations.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, id: u64) {
        self.entries.lock().unwrap().retain(|(entry_id, _)| *entry_id != id);
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for one registration in a [`Listeners`] hub.
///
/// Dropping the guard unsubscribes; [`Subscription::detach`] keeps the
/// registration alive for the lifetime of the hub instead.
pub struct Subscription<T> {
    id: u64,
    hub: Weak<Listeners<T>>,
    active: bool,
}

impl<T> Subscription<T> {
    /// Remove the registration now.
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    /// Consume the guard without unsubscribing.
    pub fn detach(mut self) {
        self.active = false;
    }

    fn remove(&mut self) {
        if self.active {
            self.active = false;
            if let Some(hub) = self.hub.upgrade() {
                hub.remove(self.id);
            }
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.remove();
    }
}
