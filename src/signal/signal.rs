use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Weak};

type Watcher<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Watchers<T> {
    next_id: usize,
    entries: Vec<(usize, Watcher<T>)>,
}

impl<T> Watchers<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

/// Something a [`WatchGuard`] can unregister itself from.
trait Detach: Send + Sync {
    fn detach(&self, id: usize);
}

impl<T> Detach for Mutex<Watchers<T>> {
    fn detach(&self, id: usize) {
        self.lock().entries.retain(|(entry_id, _)| *entry_id != id);
    }
}

/// A reactive value that notifies its watchers when changed.
///
/// Clones share the same value and watcher list.
///
/// # Examples
///
/// ```
/// use tallyboard::Signal;
/// use std::sync::{Arc, atomic::{AtomicU32, Ordering}};
///
/// let count = Signal::new(0u32);
/// let seen = Arc::new(AtomicU32::new(0));
///
/// let _guard = count.watch({
///     let seen = seen.clone();
///     move |value| seen.store(*value, Ordering::SeqCst)
/// });
///
/// count.set(7);
/// assert_eq!(seen.load(Ordering::SeqCst), 7);
/// ```
pub struct Signal<T> {
    value: Arc<RwLock<T>>,
    watchers: Arc<Mutex<Watchers<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            watchers: Arc::clone(&self.watchers),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Create a new signal with the given initial value.
    pub fn new(initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            watchers: Arc::new(Mutex::new(Watchers::new())),
        }
    }

    /// Get the current value of the signal.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Set a new value and notify watchers.
    pub fn set(&self, new_value: T) {
        *self.value.write() = new_value;
        self.notify();
    }

    /// Update the value in place and notify watchers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut *self.value.write());
        self.notify();
    }

    /// Read the value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.value.read())
    }

    /// Watch this signal for changes.
    ///
    /// The callback runs once immediately with the current value and again
    /// after every `set`/`update`, until the returned guard is dropped.
    pub fn watch<F>(&self, callback: F) -> WatchGuard
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Watcher<T> = Arc::new(callback);
        let id = {
            let mut watchers = self.watchers.lock();
            let id = watchers.next_id;
            watchers.next_id += 1;
            watchers.entries.push((id, Arc::clone(&callback)));
            id
        };

        let current = self.get();
        callback(&current);

        let watchers: Weak<Mutex<Watchers<T>>> = Arc::downgrade(&self.watchers);
        let registry: Weak<dyn Detach> = watchers;
        WatchGuard { id, registry }
    }

    /// Number of live watchers.
    pub fn watcher_count(&self) -> usize {
        self.watchers.lock().entries.len()
    }

    fn notify(&self) {
        // Callbacks run without any lock held so they may read the signal.
        let callbacks: Vec<Watcher<T>> = self
            .watchers
            .lock()
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        let current = self.get();
        for callback in callbacks {
            callback(&current);
        }
    }
}

/// RAII guard for signal watchers.
pub struct WatchGuard {
    id: usize,
    registry: Weak<dyn Detach>,
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.detach(self.id);
        }
    }
}
