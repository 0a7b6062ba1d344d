//! # Global Stores
//!
//! The globally observed account and network stores. They always mirror the
//! active namespace's snapshot; only the coordinator writes to them.

use shared_bus::{StateKey, Store, Subscription};
use shared_types::{AccountState, NetworkState};

/// Read/subscribe handle over a globally observed snapshot.
///
/// Clones share the same store.
#[derive(Clone, Debug)]
pub struct ObservedStore<S> {
    store: Store<S>,
}

/// Globally observed account store.
pub type AccountController = ObservedStore<AccountState>;

/// Globally observed network store.
pub type NetworkController = ObservedStore<NetworkState>;

impl<S> ObservedStore<S>
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    fn labelled(label: &str, initial: S) -> Self {
        Self {
            store: Store::new(label, initial),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> S {
        self.store.get()
    }

    /// Read one key of the current snapshot.
    pub fn get<T>(&self, key: StateKey<S, T>) -> T {
        self.store.read(|state| key.get(state))
    }

    /// Observe every change of the snapshot.
    pub fn subscribe(&self, callback: impl Fn(&S) + Send + Sync + 'static) -> Subscription {
        self.store.subscribe(callback)
    }

    /// Observe one key of the snapshot.
    pub fn subscribe_key<T>(
        &self,
        key: StateKey<S, T>,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription
    where
        T: Clone + PartialEq + Send + 'static,
    {
        self.store.subscribe_key(key, callback)
    }

    /// Overwrite the snapshot wholesale.
    pub(crate) fn replace_state(&self, next: S) -> bool {
        self.store.replace(next)
    }
}

impl ObservedStore<AccountState> {
    /// Store holding the neutral account snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::labelled("account", AccountState::default())
    }
}

impl Default for ObservedStore<AccountState> {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservedStore<NetworkState> {
    /// Store holding the neutral network snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::labelled("network", NetworkState::default())
    }
}

impl Default for ObservedStore<NetworkState> {
    fn default() -> Self {
        Self::new()
    }
}
