//! # Coordinator State
//!
//! The record held in the coordinator's store, and the public projection
//! republished to the application.

use super::adapter::{ChainAdapter, UniversalAdapter};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shared_types::{CaipChainId, CaipNetwork, ChainNamespace, Connector};
use std::sync::Arc;

/// Coordinator-level state.
///
/// `chains` iterates in registration order. When `is_universal_adapter_only`
/// is set, client lookups go through `universal_adapter`, never `chains`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChainControllerState {
    /// Whether account writes honour an explicit namespace.
    pub multi_chain_enabled: bool,
    /// Namespace the global stores mirror.
    pub active_chain: Option<ChainNamespace>,
    /// Shared with the active adapter's network snapshot.
    pub active_caip_network: Option<Arc<CaipNetwork>>,
    /// Registered adapters.
    pub chains: IndexMap<ChainNamespace, ChainAdapter>,
    /// Connector used for the current connection.
    pub active_connector: Option<Connector>,
    /// Clients used in universal-adapter-only mode.
    pub universal_adapter: UniversalAdapter,
    /// Route client lookups to `universal_adapter`.
    pub is_universal_adapter_only: bool,
}

impl ChainControllerState {
    /// Adapter for the active namespace.
    #[must_use]
    pub fn active_adapter(&self) -> Option<&ChainAdapter> {
        self.active_chain.as_ref().and_then(|ns| self.chains.get(ns))
    }
}

/// Application-visible selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    /// Active namespace.
    pub active_chain: Option<ChainNamespace>,
    /// Selected chain id.
    pub selected_network_id: Option<CaipChainId>,
}

impl PublicState {
    /// New state with `update` applied.
    #[must_use]
    pub fn merged(&self, update: &PublicStateUpdate) -> Self {
        let mut next = self.clone();
        if let Some(chain) = &update.active_chain {
            next.active_chain = Some(chain.clone());
        }
        if let Some(id) = &update.selected_network_id {
            next.selected_network_id = id.clone();
        }
        next
    }
}

/// Partial public state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicStateUpdate {
    /// New active namespace, if changed.
    pub active_chain: Option<ChainNamespace>,
    /// `Some(None)` clears the selection.
    pub selected_network_id: Option<Option<CaipChainId>>,
}

impl PublicStateUpdate {
    /// Only the active namespace changed.
    #[must_use]
    pub fn active_chain(namespace: ChainNamespace) -> Self {
        Self {
            active_chain: Some(namespace),
            selected_network_id: None,
        }
    }

    /// Namespace and selected network changed together.
    #[must_use]
    pub fn selection(namespace: ChainNamespace, network_id: Option<CaipChainId>) -> Self {
        Self {
            active_chain: Some(namespace),
            selected_network_id: Some(network_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_chain_update_keeps_selection() {
        let state = PublicState {
            active_chain: Some(ChainNamespace::EIP155),
            selected_network_id: Some(CaipChainId::evm(1)),
        };

        let next = state.merged(&PublicStateUpdate::active_chain(ChainNamespace::SOLANA));
        assert_eq!(next.active_chain, Some(ChainNamespace::SOLANA));
        assert_eq!(next.selected_network_id, Some(CaipChainId::evm(1)));
    }

    #[test]
    fn test_selection_update_can_clear() {
        let state = PublicState {
            active_chain: Some(ChainNamespace::EIP155),
            selected_network_id: Some(CaipChainId::evm(1)),
        };

        let next = state.merged(&PublicStateUpdate::selection(ChainNamespace::SOLANA, None));
        assert_eq!(next.selected_network_id, None);
    }

    #[test]
    fn test_public_state_serializes() {
        let state = PublicState {
            active_chain: Some(ChainNamespace::EIP155),
            selected_network_id: Some(CaipChainId::evm(137)),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("eip155:137"));
    }

    #[test]
    fn test_no_active_adapter_by_default() {
        assert!(ChainControllerState::default().active_adapter().is_none());
    }
}
