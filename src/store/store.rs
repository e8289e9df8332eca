use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Weak};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscribers<T> {
    next_id: usize,
    entries: Vec<(usize, Subscriber<T>)>,
}

/// Something a [`Subscription`] can remove itself from.
trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: usize);
}

impl<T> Unsubscribe for Mutex<Subscribers<T>> {
    fn unsubscribe(&self, id: usize) {
        self.lock().entries.retain(|(entry_id, _)| *entry_id != id);
    }
}

/// A thread-safe container for shared state, typically the full record
/// set several charts draw from.
///
/// Subscribers run after every `set`/`update`.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    subscribers: Arc<Mutex<Subscribers<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(Mutex::new(Subscribers {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        self.state.read().clone()
    }

    /// Update the state using a function.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut *self.state.write());
        self.notify();
    }

    /// Set a new state value.
    pub fn set(&self, new_state: T) {
        *self.state.write() = new_state;
        self.notify();
    }

    /// Subscribe to state changes.
    ///
    /// Unlike a signal watcher the callback is not run on subscription,
    /// only on later changes, and only until the subscription is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut subscribers = self.subscribers.lock();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.entries.push((id, Arc::new(callback)));

        let entries: Weak<Mutex<Subscribers<T>>> = Arc::downgrade(&self.subscribers);
        let registry: Weak<dyn Unsubscribe> = entries;
        Subscription { id, registry }
    }

    /// Read state without notifying anyone.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&*self.state.read())
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().entries.len()
    }

    fn notify(&self) {
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .lock()
            .entries
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        let state = self.get();
        for subscriber in subscribers {
            subscriber(&state);
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

/// RAII guard for store subscribers.
pub struct Subscription {
    id: usize,
    registry: Weak<dyn Unsubscribe>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unsubscribe(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn store_get_set_update() {
        let store = Store::new(vec![Record::new(1.0).with_field("color", "blue")]);
        assert_eq!(store.get().len(), 1);

        store.update(|records| records.push(Record::new(4.0).with_field("color", "red")));
        assert_eq!(store.read(|records| records.len()), 2);

        store.set(Vec::new());
        assert!(store.get().is_empty());
    }

    #[test]
    fn store_subscribe_until_dropped() {
        let store = Store::new(0);
        let call_count = Arc::new(AtomicUsize::new(0));

        let subscription = store.subscribe({
            let call_count = call_count.clone();
            move |_| {
                call_count.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert_eq!(call_count.load(Ordering::SeqCst), 0);

        store.update(|n| *n += 1);
        store.set(5);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);

        drop(subscription);
        assert_eq!(store.subscriber_count(), 0);
        store.set(6);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clones_share_state() {
        let store = Store::new(1);
        let other = store.clone();
        other.set(2);
        assert_eq!(store.get(), 2);
    }
}
