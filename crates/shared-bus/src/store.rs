//! # Reactive Store
//!
//! Observable state owner. Every mutation goes through `update` or `replace`;
//! observers are notified synchronously, before the mutating call returns.

use crate::key::StateKey;
use crate::subscriber::Subscription;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Observable state container.
///
/// Cloning a `Store` yields another handle to the same state.
///
/// A mutation is *effective* when the state after the mutation differs from
/// the state before it (`PartialEq`). Observers only run for effective
/// mutations, exactly once each. The state lock is released before observers
/// run, so an observer may read (or even update) the store again. A nested
/// update delivers its newer snapshot to every observer; the outer delivery
/// then stops, so no observer is left holding an older snapshot.
pub struct Store<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    /// Store label, for logs.
    label: String,

    /// Current state.
    state: RwLock<S>,

    /// Registered observers in subscription order.
    observers: RwLock<Vec<(u64, Observer<S>)>>,

    /// Next observer id.
    next_id: AtomicU64,

    /// Effective mutations so far; also the generation of the latest snapshot.
    mutations: AtomicU64,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Store<S>
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a store holding `initial`.
    #[must_use]
    pub fn new(label: impl Into<String>, initial: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                label: label.into(),
                state: RwLock::new(initial),
                observers: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(0),
                mutations: AtomicU64::new(0),
            }),
        }
    }

    /// Store label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn get(&self) -> S {
        self.inner.state.read().clone()
    }

    /// Borrow the current state for the duration of `f`.
    ///
    /// `f` must not mutate this store.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.state.read())
    }

    /// Mutate the state in place and notify observers if anything changed.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut S) -> R) -> R {
        let (result, changed) = {
            let mut state = self.inner.state.write();
            let before = state.clone();
            let result = mutate(&mut state);
            let changed = (*state != before).then(|| (state.clone(), self.next_generation()));
            (result, changed)
        };

        match changed {
            Some((snapshot, generation)) => self.commit(&snapshot, generation),
            None => trace!(store = %self.inner.label, "[bus] update without effect"),
        }
        result
    }

    /// Replace the whole state. Returns whether the state changed.
    pub fn replace(&self, next: S) -> bool {
        let changed = {
            let mut state = self.inner.state.write();
            if *state == next {
                None
            } else {
                *state = next;
                Some((state.clone(), self.next_generation()))
            }
        };

        match changed {
            Some((snapshot, generation)) => {
                self.commit(&snapshot, generation);
                true
            }
            None => false,
        }
    }

    /// Observe every effective mutation with the full state snapshot.
    pub fn subscribe(&self, callback: impl Fn(&S) + Send + Sync + 'static) -> Subscription {
        self.attach(Arc::new(callback))
    }

    /// Observe one key. `callback` runs with the new value each time the
    /// key's value changes.
    pub fn subscribe_key<T>(
        &self,
        key: StateKey<S, T>,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription
    where
        T: Clone + PartialEq + Send + 'static,
    {
        self.subscribe_select(move |state| key.get(state), callback)
    }

    /// Observe an arbitrary projection of the state.
    pub fn subscribe_select<T, F, C>(&self, select: F, callback: C) -> Subscription
    where
        T: Clone + PartialEq + Send + 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
        C: Fn(&T) + Send + Sync + 'static,
    {
        let previous = Mutex::new(self.read(&select));

        self.attach(Arc::new(move |state: &S| {
            let next = select(state);
            let changed = {
                let mut prev = previous.lock();
                if *prev == next {
                    false
                } else {
                    *prev = next.clone();
                    true
                }
            };
            if changed {
                callback(&next);
            }
        }))
    }

    /// Number of registered observers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.read().len()
    }

    /// Number of effective mutations so far.
    #[must_use]
    pub fn mutations(&self) -> u64 {
        self.inner.mutations.load(Ordering::Relaxed)
    }

    fn attach(&self, observer: Observer<S>) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.observers.write().push((id, observer));
        debug!(store = %self.inner.label, id, "[bus] observer added");

        let weak: Weak<Inner<S>> = Arc::downgrade(&self.inner);
        Subscription::new(
            id,
            self.inner.label.clone(),
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.observers.write().retain(|(observer_id, _)| *observer_id != id);
                }
            }),
        )
    }

    /// Must be called with the state write lock held.
    fn next_generation(&self) -> u64 {
        self.inner.mutations.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn commit(&self, snapshot: &S, generation: u64) {
        // Copy the list so observers may subscribe/unsubscribe while running.
        let observers: Vec<Observer<S>> = self
            .inner
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        debug!(
            store = %self.inner.label,
            observers = observers.len(),
            "[bus] state changed"
        );

        for observer in observers {
            // A nested update already delivered a newer snapshot to everyone.
            if self.inner.mutations.load(Ordering::Relaxed) != generation {
                trace!(store = %self.inner.label, generation, "[bus] stale delivery stopped");
                return;
            }
            observer(snapshot);
        }
    }
}

impl<S> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("label", &self.inner.label)
            .field("observers", &self.inner.observers.read().len())
            .field("mutations", &self.inner.mutations.load(Ordering::Relaxed))
            .finish()
    }
}
