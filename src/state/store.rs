//! Observable value container shared by the session and toast state.
//!
//! DESIGN
//! ======
//! A `Store<T>` owns one value and a list of subscriber callbacks. Every
//! write publishes a snapshot; snapshots are delivered to subscribers in
//! write order, synchronously on the writing task. Writes issued while a
//! delivery is already running (from a callback, or from another thread)
//! are queued and drained by the active deliverer, so a callback may freely
//! write to the store it observes.
//!
//! Callbacks never run while the internal lock is held.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Cheaply cloneable handle to a shared observable value.
pub struct Store<T> {
    shared: Arc<Mutex<StoreState<T>>>,
}

struct StoreState<T> {
    value: T,
    version: u64,
    /// Snapshots awaiting delivery, tagged with their version.
    pending: VecDeque<(u64, T)>,
    delivering: bool,
    next_subscriber_id: u64,
    subscribers: Vec<Subscriber<T>>,
}

struct Subscriber<T> {
    id: u64,
    /// Version the subscriber was primed with; older snapshots are skipped.
    since: u64,
    callback: Callback<T>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<T: Default + Clone + Send + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.shared);
        f.debug_struct("Store")
            .field("value", &state.value)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

impl<T: Clone + Send + 'static> Store<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Mutex::new(StoreState {
                value,
                version: 0,
                pending: VecDeque::new(),
                delivering: false,
                next_subscriber_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        lock(&self.shared).value.clone()
    }

    /// Borrow the current value without cloning.
    ///
    /// `f` runs under the store lock and must not access this store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.shared).value)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut state = lock(&self.shared);
        let out = f(&mut state.value);
        self.publish(state);
        out
    }

    /// Mutate the value in place; subscribers are notified only when `f`
    /// reports a change by returning `true`.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let mut state = lock(&self.shared);
        let changed = f(&mut state.value);
        if changed {
            self.publish(state);
        }
        changed
    }

    /// Register `callback`. It is invoked immediately with the current value
    /// and then after every subsequent change, until the returned
    /// `Subscription` is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let (id, current) = {
            let mut state = lock(&self.shared);
            let id = state.next_subscriber_id;
            state.next_subscriber_id += 1;
            let since = state.version;
            state.subscribers.push(Subscriber { id, since, callback: callback.clone() });
            (id, state.value.clone())
        };
        callback(&current);

        let weak = Arc::downgrade(&self.shared);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    lock(&shared).subscribers.retain(|s| s.id != id);
                }
            })),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared).subscribers.len()
    }

    fn publish<'a>(&'a self, mut state: MutexGuard<'a, StoreState<T>>) {
        state.version += 1;
        let snapshot = (state.version, state.value.clone());
        state.pending.push_back(snapshot);
        if state.delivering {
            return;
        }
        state.delivering = true;
        let _reset = DeliveryReset { shared: &self.shared };

        loop {
            let Some((version, value)) = state.pending.pop_front() else {
                state.delivering = false;
                return;
            };
            let callbacks: Vec<Callback<T>> = state
                .subscribers
                .iter()
                .filter(|s| s.since < version)
                .map(|s| s.callback.clone())
                .collect();
            drop(state);

            for callback in &callbacks {
                callback(&value);
            }

            state = lock(&self.shared);
        }
    }
}

/// Unblocks delivery if a subscriber panics mid-round; queued snapshots are discarded.
struct DeliveryReset<'a, T> {
    shared: &'a Mutex<StoreState<T>>,
}

impl<T> Drop for DeliveryReset<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut state = lock(self.shared);
            state.delivering = false;
            state.pending.clear();
        }
    }
}

/// Keeps a store callback registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
