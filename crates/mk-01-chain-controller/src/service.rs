//! # Chain Controller Service
//!
//! Owns the adapter registry and the active namespace, and keeps the
//! globally observed account/network stores mirrored to the active
//! namespace.

use async_trait::async_trait;
use shared_bus::{StateKey, Store, Subscription};
use shared_types::{
    AccountProp, AccountState, AccountUpdate, CaipChainId, CaipNetwork, ChainNamespace,
    Connector, NetworkState, NetworkUpdate,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ChainControllerConfig;
use crate::domain::{
    AdapterInit, ChainAdapter, ChainControllerError, ChainControllerState, ConnectionClientRef,
    NetworkClientRef, PublicStateUpdate, UniversalAdapter,
};
use crate::ports::{ChainControllerApi, PublicStatePublisher};
use crate::stores::{AccountController, NetworkController};

/// Chain Coordinator.
///
/// All writes to the adapter snapshots and to the global stores go through
/// this type. Readers observe through [`Self::subscribe`],
/// [`Self::subscribe_key`] and the global store handles.
///
/// Writes are expected from one thread at a time. The global stores are
/// replaced after the state lock is released, so two concurrent writers may
/// leave them mirroring the older of the two adapter snapshots.
pub struct ChainController {
    /// Configuration.
    config: ChainControllerConfig,
    /// Coordinator state.
    state: Store<ChainControllerState>,
    /// Global account store (write side).
    accounts: AccountController,
    /// Global network store (write side).
    networks: NetworkController,
    /// Public-state collaborator.
    public_state: Arc<dyn PublicStatePublisher>,
}

impl ChainController {
    /// Create a coordinator writing to `accounts` and `networks`.
    pub fn new(
        config: ChainControllerConfig,
        accounts: AccountController,
        networks: NetworkController,
        public_state: Arc<dyn PublicStatePublisher>,
    ) -> Self {
        let initial = ChainControllerState {
            multi_chain_enabled: config.multi_chain_enabled,
            is_universal_adapter_only: config.universal_adapter_only,
            ..ChainControllerState::default()
        };
        Self {
            config,
            state: Store::new("chain-controller", initial),
            accounts,
            networks,
            public_state,
        }
    }

    /// Configuration.
    pub fn config(&self) -> &ChainControllerConfig {
        &self.config
    }

    /// Snapshot of the coordinator state.
    pub fn state(&self) -> ChainControllerState {
        self.state.get()
    }

    /// Active namespace.
    pub fn active_chain(&self) -> Option<ChainNamespace> {
        self.state.read(|s| s.active_chain.clone())
    }

    /// Active chain descriptor.
    pub fn active_caip_network(&self) -> Option<Arc<CaipNetwork>> {
        self.state.read(|s| s.active_caip_network.clone())
    }

    /// Whether multi-chain mode is on.
    pub fn is_multi_chain_enabled(&self) -> bool {
        self.state.read(|s| s.multi_chain_enabled)
    }

    /// Registered adapter for `namespace`.
    pub fn adapter(&self, namespace: &ChainNamespace) -> Option<ChainAdapter> {
        self.state.read(|s| s.chains.get(namespace).cloned())
    }

    /// Registered namespaces in registration order.
    pub fn namespaces(&self) -> Vec<ChainNamespace> {
        self.state.read(|s| s.chains.keys().cloned().collect())
    }

    /// Globally observed account store.
    pub fn account_store(&self) -> &AccountController {
        &self.accounts
    }

    /// Globally observed network store.
    pub fn network_store(&self) -> &NetworkController {
        &self.networks
    }

    /// Observe every coordinator state change.
    pub fn subscribe(
        &self,
        callback: impl Fn(&ChainControllerState) + Send + Sync + 'static,
    ) -> Subscription {
        self.state.subscribe(callback)
    }

    /// Observe one coordinator key (see `controller_keys`).
    pub fn subscribe_key<T>(
        &self,
        key: StateKey<ChainControllerState, T>,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription
    where
        T: Clone + PartialEq + Send + 'static,
    {
        self.state.subscribe_key(key, callback)
    }

    /// Observe the active adapter entry.
    ///
    /// Fires when another namespace becomes active or when the active
    /// adapter's entry changes.
    pub fn subscribe_chain(
        &self,
        callback: impl Fn(Option<&ChainAdapter>) + Send + Sync + 'static,
    ) -> Subscription {
        self.state.subscribe_select(
            |s: &ChainControllerState| s.active_adapter().cloned(),
            move |adapter: &Option<ChainAdapter>| callback(adapter.as_ref()),
        )
    }

    /// Observe one property of the active adapter (see `adapter_keys`).
    pub fn subscribe_chain_prop<T>(
        &self,
        key: StateKey<ChainAdapter, T>,
        callback: impl Fn(Option<&T>) + Send + Sync + 'static,
    ) -> Subscription
    where
        T: Clone + PartialEq + Send + 'static,
    {
        self.state.subscribe_select(
            move |s: &ChainControllerState| s.active_adapter().map(|adapter| key.get(adapter)),
            move |value: &Option<T>| callback(value.as_ref()),
        )
    }

    /// Copy the active adapter's snapshots into the global stores.
    fn mirror_active(&self) {
        if let Some(adapter) = self.state.read(|s| s.active_adapter().cloned()) {
            self.accounts.replace_state(adapter.account_state);
            self.networks.replace_state(adapter.network_state);
        }
    }

    /// Whether a write to `namespace` must reach the global store.
    fn must_replicate(state: &ChainControllerState, namespace: &ChainNamespace, replace: bool) -> bool {
        replace || state.chains.len() == 1 || state.active_chain.as_ref() == Some(namespace)
    }

    fn write_network(&self, namespace: &ChainNamespace, update: &NetworkUpdate, replace: bool) {
        let outcome = self.state.update(|s| {
            let replicate = Self::must_replicate(s, namespace, replace);
            let is_active = s.active_chain.as_ref() == Some(namespace);
            let adapter = s.chains.get_mut(namespace)?;
            adapter.network_state = adapter.network_state.merged(update);
            let snapshot = adapter.network_state.clone();

            // The active descriptor is shared with the active adapter.
            if is_active {
                if let Some(network) = &update.caip_network {
                    s.active_caip_network = network.clone();
                }
            }
            Some(replicate.then_some(snapshot))
        });

        match outcome {
            None => debug!(namespace = %namespace, "[mk-01] Ignoring network data for unregistered namespace"),
            Some(None) => debug!(namespace = %namespace, "[mk-01] Network data stored"),
            Some(Some(snapshot)) => {
                // Outside the state lock; see the type docs.
                self.networks.replace_state(snapshot);
                debug!(namespace = %namespace, "[mk-01] Network data replicated");
            }
        }
    }

    fn write_account(&self, namespace: &ChainNamespace, update: &AccountUpdate, replace: bool) {
        let outcome = self.state.update(|s| {
            let replicate = Self::must_replicate(s, namespace, replace);
            let adapter = s.chains.get_mut(namespace)?;
            adapter.account_state = adapter.account_state.merged(update);
            Some(replicate.then(|| adapter.account_state.clone()))
        });

        match outcome {
            None => debug!(namespace = %namespace, "[mk-01] Ignoring account data for unregistered namespace"),
            Some(None) => debug!(namespace = %namespace, "[mk-01] Account data stored"),
            Some(Some(snapshot)) => {
                // Outside the state lock; see the type docs.
                self.accounts.replace_state(snapshot);
                debug!(namespace = %namespace, "[mk-01] Account data replicated");
            }
        }
    }

    /// Resolve the network client, universal adapter first.
    fn network_client_for(
        &self,
        namespace: Option<&ChainNamespace>,
        operation: &'static str,
    ) -> Result<NetworkClientRef, ChainControllerError> {
        self.state.read(|s| {
            if s.is_universal_adapter_only {
                return s
                    .universal_adapter
                    .network_client
                    .clone()
                    .ok_or(ChainControllerError::UniversalNetworkClientNotSet);
            }

            let namespace = namespace
                .or(s.active_chain.as_ref())
                .ok_or(ChainControllerError::MissingNamespace { operation })?;
            let adapter = s
                .chains
                .get(namespace)
                .ok_or_else(|| ChainControllerError::AdapterNotFound(namespace.clone()))?;
            adapter
                .network_client
                .clone()
                .ok_or_else(|| ChainControllerError::NetworkClientNotSet(namespace.clone()))
        })
    }
}

#[async_trait]
impl ChainControllerApi for ChainController {
    fn initialize(&self, adapters: Vec<AdapterInit>) -> Result<(), ChainControllerError> {
        let first = adapters
            .first()
            .ok_or(ChainControllerError::EmptyAdapterList)?;
        let active = first.namespace.clone();
        let default_network = first.default_network.clone();
        let count = adapters.len();

        self.state.update(|s| {
            s.active_chain = Some(active.clone());
            for init in adapters {
                let namespace = init.namespace.clone();
                if s.chains.contains_key(&namespace) {
                    warn!(namespace = %namespace, "[mk-01] Replacing registered chain adapter");
                }
                // Re-inserting an existing key keeps its position.
                s.chains.insert(namespace, ChainAdapter::registered(init));
            }
            s.active_caip_network = s.active_adapter().and_then(|a| a.caip_network().cloned());
        });

        self.mirror_active();
        self.public_state.set(PublicStateUpdate::active_chain(active.clone()));
        info!(namespace = %active, adapters = count, "[mk-01] Chain controller initialized");

        self.set_active_caip_network(default_network);
        Ok(())
    }

    fn initialize_universal_adapter(&self, adapter: UniversalAdapter) {
        let active = self.config.default_namespace.clone();
        let placeholders = self.config.universal_namespaces.clone();

        self.state.update(|s| {
            s.active_chain = Some(active.clone());
            s.universal_adapter = adapter;
            for namespace in placeholders {
                s.chains
                    .insert(namespace.clone(), ChainAdapter::placeholder(namespace));
            }
        });

        self.mirror_active();
        self.public_state.set(PublicStateUpdate::active_chain(active.clone()));
        info!(namespace = %active, "[mk-01] Universal adapter initialized");
    }

    fn set_multi_chain_enabled(&self, enabled: bool) {
        self.state.update(|s| s.multi_chain_enabled = enabled);
    }

    fn set_is_universal_adapter_only(&self, enabled: bool) {
        self.state.update(|s| s.is_universal_adapter_only = enabled);
    }

    fn set_chain_network_data(
        &self,
        namespace: Option<&ChainNamespace>,
        update: NetworkUpdate,
        replace: bool,
    ) -> Result<(), ChainControllerError> {
        let namespace = namespace.ok_or(ChainControllerError::MissingNamespace {
            operation: "set_chain_network_data",
        })?;
        self.write_network(namespace, &update, replace);
        Ok(())
    }

    fn set_chain_account_data(
        &self,
        namespace: Option<&ChainNamespace>,
        update: AccountUpdate,
        replace: bool,
    ) -> Result<(), ChainControllerError> {
        let namespace = namespace.ok_or(ChainControllerError::MissingNamespace {
            operation: "set_chain_account_data",
        })?;
        self.write_account(namespace, &update, replace);
        Ok(())
    }

    fn set_account_prop(
        &self,
        prop: AccountProp,
        namespace: Option<&ChainNamespace>,
    ) -> Result<(), ChainControllerError> {
        let target = self.state.read(|s| {
            if s.multi_chain_enabled {
                namespace.cloned()
            } else {
                s.active_chain.clone()
            }
        });
        self.set_chain_account_data(target.as_ref(), prop.into(), true)
    }

    fn set_active_chain(&self, namespace: Option<&ChainNamespace>) {
        let Some(namespace) = namespace else {
            return;
        };

        let activated = self.state.update(|s| {
            if s.active_chain.as_ref() == Some(namespace) {
                return None;
            }
            let adapter = s.chains.get(namespace)?.clone();
            s.active_chain = Some(namespace.clone());
            s.active_caip_network = adapter.caip_network().cloned();
            Some(adapter)
        });

        let Some(adapter) = activated else {
            debug!(namespace = %namespace, "[mk-01] Active chain unchanged");
            return;
        };

        let selected = adapter.caip_network().map(|network| network.id.clone());
        self.accounts.replace_state(adapter.account_state);
        self.networks.replace_state(adapter.network_state);
        self.public_state
            .set(PublicStateUpdate::selection(namespace.clone(), selected));
        info!(namespace = %namespace, "[mk-01] Active chain set");
    }

    fn set_active_caip_network(&self, network: Option<Arc<CaipNetwork>>) {
        let Some(network) = network else {
            return;
        };
        let namespace = network.chain_namespace().clone();

        if self.active_chain().as_ref() != Some(&namespace) {
            self.set_active_chain(Some(&namespace));
        }

        self.state.update(|s| {
            s.active_caip_network = Some(Arc::clone(&network));
            s.active_chain = Some(namespace.clone());
        });
        self.write_network(
            &namespace,
            &NetworkUpdate::caip_network(Some(Arc::clone(&network))),
            true,
        );
        self.public_state.set(PublicStateUpdate::selection(
            namespace.clone(),
            Some(network.id.clone()),
        ));
        info!(namespace = %namespace, chain_id = %network.id, "[mk-01] Active network set");
    }

    fn set_caip_network(
        &self,
        namespace: &ChainNamespace,
        network: Option<Arc<CaipNetwork>>,
        should_replace: bool,
    ) {
        self.write_network(namespace, &NetworkUpdate::caip_network(network), should_replace);
    }

    fn set_active_connector(&self, connector: Option<Connector>) {
        if let Some(connector) = connector {
            debug!(connector = %connector.id, "[mk-01] Active connector set");
            self.state.update(|s| s.active_connector = Some(connector));
        }
    }

    fn get_network_controller_client(&self) -> Result<NetworkClientRef, ChainControllerError> {
        self.network_client_for(None, "get_network_controller_client")
    }

    fn get_connection_controller_client(
        &self,
        namespace: Option<&ChainNamespace>,
    ) -> Result<ConnectionClientRef, ChainControllerError> {
        self.state.read(|s| {
            if s.is_universal_adapter_only {
                return s
                    .universal_adapter
                    .connection_client
                    .clone()
                    .ok_or(ChainControllerError::UniversalConnectionClientNotSet);
            }

            let namespace = namespace.or(s.active_chain.as_ref()).ok_or(
                ChainControllerError::MissingNamespace {
                    operation: "get_connection_controller_client",
                },
            )?;
            let adapter = s
                .chains
                .get(namespace)
                .ok_or_else(|| ChainControllerError::AdapterNotFound(namespace.clone()))?;
            adapter
                .connection_client
                .clone()
                .ok_or_else(|| ChainControllerError::ConnectionClientNotSet(namespace.clone()))
        })
    }

    fn get_account_prop<T>(
        &self,
        key: StateKey<AccountState, T>,
        namespace: Option<&ChainNamespace>,
    ) -> Option<T> {
        self.state.read(|s| {
            let namespace = namespace.or(s.active_chain.as_ref())?;
            s.chains
                .get(namespace)
                .map(|adapter| key.get(&adapter.account_state))
        })
    }

    fn get_network_prop<T>(
        &self,
        key: StateKey<NetworkState, T>,
        namespace: Option<&ChainNamespace>,
    ) -> Option<T> {
        self.state.read(|s| {
            let namespace = namespace.or(s.active_chain.as_ref())?;
            s.chains
                .get(namespace)
                .map(|adapter| key.get(&adapter.network_state))
        })
    }

    fn get_all_approved_caip_networks(&self) -> Vec<CaipChainId> {
        self.state.read(|s| {
            s.chains
                .values()
                .flat_map(|adapter| adapter.network_state.approved_caip_network_ids.iter().cloned())
                .collect()
        })
    }

    fn reset_account(&self, namespace: Option<&ChainNamespace>) -> Result<(), ChainControllerError> {
        let target = self
            .state
            .read(|s| {
                if s.multi_chain_enabled {
                    namespace.or(s.active_chain.as_ref()).cloned()
                } else {
                    s.active_chain.clone()
                }
            })
            .ok_or(ChainControllerError::MissingNamespace {
                operation: "reset_account",
            })?;

        self.write_account(&target, &AccountUpdate::reset(), true);
        info!(namespace = %target, "[mk-01] Account reset");
        Ok(())
    }

    async fn switch_active_network(
        &self,
        network: Arc<CaipNetwork>,
    ) -> Result<(), ChainControllerError> {
        let client = self.get_network_controller_client()?;
        client.switch_caip_network(&network).await?;
        self.set_active_caip_network(Some(network));
        Ok(())
    }

    async fn sync_approved_networks(
        &self,
        namespace: Option<&ChainNamespace>,
    ) -> Result<Vec<CaipChainId>, ChainControllerError> {
        let target = namespace
            .cloned()
            .or_else(|| self.active_chain())
            .ok_or(ChainControllerError::MissingNamespace {
                operation: "sync_approved_networks",
            })?;
        let client = self.network_client_for(Some(&target), "sync_approved_networks")?;
        let data = client.get_approved_caip_networks_data().await?;

        let update = NetworkUpdate {
            approved_caip_network_ids: Some(data.approved_caip_network_ids.clone()),
            supports_all_networks: Some(data.supports_all_networks),
            ..NetworkUpdate::default()
        };
        self.write_network(&target, &update, false);
        debug!(
            namespace = %target,
            approved = data.approved_caip_network_ids.len(),
            "[mk-01] Approved networks synced"
        );
        Ok(data.approved_caip_network_ids)
    }
}
