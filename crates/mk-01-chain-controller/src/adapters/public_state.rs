//! # In-Memory Public State
//!
//! Store-backed [`PublicStatePublisher`] for embedding and tests.

use crate::domain::{PublicState, PublicStateUpdate};
use crate::ports::PublicStatePublisher;
use shared_bus::{Store, Subscription};
use tracing::debug;

/// Public state held in a reactive store.
#[derive(Clone, Debug)]
pub struct InMemoryPublicState {
    store: Store<PublicState>,
}

impl InMemoryPublicState {
    /// Empty public state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Store::new("public-state", PublicState::default()),
        }
    }

    /// Current public state.
    #[must_use]
    pub fn state(&self) -> PublicState {
        self.store.get()
    }

    /// Observe every change of the public state.
    pub fn subscribe(&self, callback: impl Fn(&PublicState) + Send + Sync + 'static) -> Subscription {
        self.store.subscribe(callback)
    }
}

impl Default for InMemoryPublicState {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicStatePublisher for InMemoryPublicState {
    fn set(&self, update: PublicStateUpdate) {
        debug!("[mk-01] Publishing {:?}", update);
        self.store.update(|state| *state = state.merged(&update));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{CaipChainId, ChainNamespace};

    #[test]
    fn test_set_merges_update() {
        let public = InMemoryPublicState::new();
        public.set(PublicStateUpdate::selection(
            ChainNamespace::EIP155,
            Some(CaipChainId::evm(1)),
        ));
        public.set(PublicStateUpdate::active_chain(ChainNamespace::SOLANA));

        let state = public.state();
        assert_eq!(state.active_chain, Some(ChainNamespace::SOLANA));
        assert_eq!(state.selected_network_id, Some(CaipChainId::evm(1)));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let public = InMemoryPublicState::new();
        let seen = std::sync::Arc::new(parking_lot::Mutex::new(0));
        let sink = std::sync::Arc::clone(&seen);
        let _sub = public.subscribe(move |_| *sink.lock() += 1);

        public.set(PublicStateUpdate::active_chain(ChainNamespace::EIP155));
        public.set(PublicStateUpdate::active_chain(ChainNamespace::EIP155));

        assert_eq!(*seen.lock(), 1);
    }
}
