//! Synchronous current-value broadcasting shared by the stores.
//!
//! An [`Observable`] holds one value and an ordered list of subscribers.
//! Subscribing replays the current value immediately; every `set` notifies
//! all live subscribers in registration order before returning. Changes and
//! replays are broadcast one at a time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

struct Shared<T> {
    value: Mutex<T>,
    subscribers: Mutex<Subscribers<T>>,
    // Held while a value change is broadcast or a new subscriber is replayed,
    // so every subscriber sees each change exactly once and in order.
    broadcast: Mutex<()>,
}

/// Shared handle to a value that notifies subscribers when it changes.
///
/// Cloning the handle shares the underlying value and subscriber list.
/// Callbacks may read the value but must not call `set`, `modify` or
/// `subscribe` on the same observable.
pub struct Observable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: Mutex::new(value),
                subscribers: Mutex::new(Subscribers {
                    next_id: 0,
                    entries: Vec::new(),
                }),
                broadcast: Mutex::new(()),
            }),
        }
    }

    /// Returns a snapshot of the current value.
    pub fn get(&self) -> T {
        lock(&self.shared.value).clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.shared.value))
    }

    /// Replaces the value and notifies every subscriber.
    pub fn set(&self, value: T) {
        let _broadcast = lock(&self.shared.broadcast);
        let current = {
            let mut slot = lock(&self.shared.value);
            *slot = value;
            (*slot).clone()
        };
        self.notify(&current);
    }

    /// Mutates the value in place and notifies every subscriber.
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let _broadcast = lock(&self.shared.broadcast);
        let (result, current) = {
            let mut slot = lock(&self.shared.value);
            let result = f(&mut *slot);
            (result, (*slot).clone())
        };
        self.notify(&current);
        result
    }

    /// Registers `callback`, replaying the current value to it immediately.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// cancelled or dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let id = {
            let _broadcast = lock(&self.shared.broadcast);
            let id = {
                let mut subscribers = lock(&self.shared.subscribers);
                let id = subscribers.next_id;
                subscribers.next_id += 1;
                subscribers.entries.push((id, Arc::clone(&callback)));
                id
            };
            let current = self.get();
            callback(&current);
            id
        };

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    lock(&shared.subscribers)
                        .entries
                        .retain(|(entry_id, _)| *entry_id != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared.subscribers).entries.len()
    }

    fn notify(&self, current: &T) {
        // Only the broadcast lock is held here, so callbacks may read the value.
        let callbacks: Vec<Callback<T>> = lock(&self.shared.subscribers)
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(current);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*lock(&self.shared.value))
            .finish_non_exhaustive()
    }
}

/// Keeps a subscriber registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
