//! # Inbound Ports
//!
//! API trait defining what the Chain Coordinator can do.

use crate::domain::{
    AdapterInit, ChainControllerError, ConnectionClientRef, NetworkClientRef, UniversalAdapter,
};
use async_trait::async_trait;
use shared_bus::StateKey;
use shared_types::{
    AccountProp, AccountState, AccountUpdate, CaipChainId, CaipNetwork, ChainNamespace,
    Connector, NetworkState, NetworkUpdate,
};
use std::sync::Arc;

/// Chain Coordinator API - inbound port.
#[async_trait]
pub trait ChainControllerApi: Send + Sync {
    /// Register adapters with neutral snapshots and activate the first one.
    ///
    /// Fails with [`ChainControllerError::EmptyAdapterList`] when `adapters`
    /// is empty. Registering a namespace again replaces its entry.
    fn initialize(&self, adapters: Vec<AdapterInit>) -> Result<(), ChainControllerError>;

    /// Store the universal client bundle, activate the default namespace and
    /// register placeholder entries for the universal namespaces.
    fn initialize_universal_adapter(&self, adapter: UniversalAdapter);

    /// Toggle multi-chain mode.
    fn set_multi_chain_enabled(&self, enabled: bool);

    /// Toggle universal-adapter-only mode.
    fn set_is_universal_adapter_only(&self, enabled: bool);

    /// Merge `update` into the namespace's network snapshot.
    ///
    /// Replicates into the global network store when `replace` is set, when
    /// exactly one adapter is registered, or when `namespace` is active.
    /// An unregistered namespace is a silent no-op; a `None` namespace is an
    /// error.
    fn set_chain_network_data(
        &self,
        namespace: Option<&ChainNamespace>,
        update: NetworkUpdate,
        replace: bool,
    ) -> Result<(), ChainControllerError>;

    /// Account counterpart of [`Self::set_chain_network_data`]. Callers
    /// normally pass `replace = true`.
    fn set_chain_account_data(
        &self,
        namespace: Option<&ChainNamespace>,
        update: AccountUpdate,
        replace: bool,
    ) -> Result<(), ChainControllerError>;

    /// Set one account property.
    ///
    /// `namespace` is only honoured in multi-chain mode; otherwise the
    /// active namespace is written.
    fn set_account_prop(
        &self,
        prop: AccountProp,
        namespace: Option<&ChainNamespace>,
    ) -> Result<(), ChainControllerError>;

    /// Make `namespace` active. No-op when it is unregistered or already
    /// active.
    fn set_active_chain(&self, namespace: Option<&ChainNamespace>);

    /// Make `network` the active chain descriptor, switching namespace first
    /// when needed. Always replicates the network snapshot.
    fn set_active_caip_network(&self, network: Option<Arc<CaipNetwork>>);

    /// Set the namespace's chain descriptor.
    fn set_caip_network(
        &self,
        namespace: &ChainNamespace,
        network: Option<Arc<CaipNetwork>>,
        should_replace: bool,
    );

    /// Remember the connector in use. `None` is ignored.
    fn set_active_connector(&self, connector: Option<Connector>);

    /// Network client of the active namespace (or the universal one).
    fn get_network_controller_client(&self) -> Result<NetworkClientRef, ChainControllerError>;

    /// Connection client of `namespace` (else the active one, or the universal one).
    fn get_connection_controller_client(
        &self,
        namespace: Option<&ChainNamespace>,
    ) -> Result<ConnectionClientRef, ChainControllerError>;

    /// Read an account property of `namespace` (else the active one).
    fn get_account_prop<T>(
        &self,
        key: StateKey<AccountState, T>,
        namespace: Option<&ChainNamespace>,
    ) -> Option<T>;

    /// Read a network property of `namespace` (else the active one).
    fn get_network_prop<T>(
        &self,
        key: StateKey<NetworkState, T>,
        namespace: Option<&ChainNamespace>,
    ) -> Option<T>;

    /// Approved chain ids of every adapter, in registration order.
    fn get_all_approved_caip_networks(&self) -> Vec<CaipChainId>;

    /// Reset a namespace's account snapshot to the disconnected defaults.
    fn reset_account(&self, namespace: Option<&ChainNamespace>) -> Result<(), ChainControllerError>;

    /// Ask the network client to switch, then activate `network`.
    async fn switch_active_network(
        &self,
        network: Arc<CaipNetwork>,
    ) -> Result<(), ChainControllerError>;

    /// Pull approved networks from the namespace's network client into its
    /// snapshot.
    async fn sync_approved_networks(
        &self,
        namespace: Option<&ChainNamespace>,
    ) -> Result<Vec<CaipChainId>, ChainControllerError>;
}
