//! # Chain Adapters
//!
//! The per-namespace bundle held by the registry, and the initializers used
//! to register it.

use crate::ports::{ConnectionControllerClient, NetworkControllerClient};
use shared_types::{AccountState, CaipNetwork, ChainNamespace, NetworkState};
use std::fmt;
use std::sync::Arc;

/// Shared network client handle.
pub type NetworkClientRef = Arc<dyn NetworkControllerClient>;

/// Shared connection client handle.
pub type ConnectionClientRef = Arc<dyn ConnectionControllerClient>;

/// Clients compare by identity: the same handle, not equal behaviour.
fn same_client<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
        (None, None) => true,
        _ => false,
    }
}

/// One registered namespace.
///
/// `account_state` and `network_state` are always present, possibly neutral,
/// even when both clients are unset.
#[derive(Clone)]
pub struct ChainAdapter {
    /// Registry key.
    pub namespace: ChainNamespace,
    /// Network control client, if the adapter supplied one.
    pub network_client: Option<NetworkClientRef>,
    /// Connection control client, if the adapter supplied one.
    pub connection_client: Option<ConnectionClientRef>,
    /// Namespace-scoped account snapshot.
    pub account_state: AccountState,
    /// Namespace-scoped network snapshot.
    pub network_state: NetworkState,
}

impl ChainAdapter {
    /// Register an initializer with neutral snapshots.
    ///
    /// A default network lands in the network snapshot without becoming
    /// active.
    #[must_use]
    pub fn registered(init: AdapterInit) -> Self {
        let network_state = NetworkState {
            caip_network: init.default_network,
            ..NetworkState::default()
        };
        Self {
            namespace: init.namespace,
            network_client: init.network_client,
            connection_client: init.connection_client,
            account_state: AccountState::default(),
            network_state,
        }
    }

    /// Placeholder entry without clients (universal-adapter setups).
    #[must_use]
    pub fn placeholder(namespace: ChainNamespace) -> Self {
        Self {
            namespace,
            network_client: None,
            connection_client: None,
            account_state: AccountState::default(),
            network_state: NetworkState::default(),
        }
    }

    /// Current chain descriptor of this namespace.
    #[must_use]
    pub fn caip_network(&self) -> Option<&Arc<CaipNetwork>> {
        self.network_state.caip_network.as_ref()
    }

    /// Whether a network client was supplied.
    #[must_use]
    pub fn has_network_client(&self) -> bool {
        self.network_client.is_some()
    }

    /// Whether a connection client was supplied.
    #[must_use]
    pub fn has_connection_client(&self) -> bool {
        self.connection_client.is_some()
    }
}

impl PartialEq for ChainAdapter {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace
            && same_client(&self.network_client, &other.network_client)
            && same_client(&self.connection_client, &other.connection_client)
            && self.account_state == other.account_state
            && self.network_state == other.network_state
    }
}

impl fmt::Debug for ChainAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainAdapter")
            .field("namespace", &self.namespace)
            .field("network_client", &self.has_network_client())
            .field("connection_client", &self.has_connection_client())
            .field("account_state", &self.account_state)
            .field("network_state", &self.network_state)
            .finish()
    }
}

/// What an adapter brings to `initialize`.
#[derive(Clone)]
pub struct AdapterInit {
    /// Namespace to register.
    pub namespace: ChainNamespace,
    /// Network control client.
    pub network_client: Option<NetworkClientRef>,
    /// Connection control client.
    pub connection_client: Option<ConnectionClientRef>,
    /// Chain to start on.
    pub default_network: Option<Arc<CaipNetwork>>,
}

impl AdapterInit {
    /// Initializer for `namespace` with no clients.
    #[must_use]
    pub fn new(namespace: ChainNamespace) -> Self {
        Self {
            namespace,
            network_client: None,
            connection_client: None,
            default_network: None,
        }
    }

    /// Attach the namespace's network client.
    #[must_use]
    pub fn with_network_client(mut self, client: NetworkClientRef) -> Self {
        self.network_client = Some(client);
        self
    }

    /// Attach the namespace's connection client.
    #[must_use]
    pub fn with_connection_client(mut self, client: ConnectionClientRef) -> Self {
        self.connection_client = Some(client);
        self
    }

    /// Seed the network snapshot with `network`.
    #[must_use]
    pub fn with_default_network(mut self, network: Arc<CaipNetwork>) -> Self {
        self.default_network = Some(network);
        self
    }
}

impl fmt::Debug for AdapterInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterInit")
            .field("namespace", &self.namespace)
            .field("network_client", &self.network_client.is_some())
            .field("connection_client", &self.connection_client.is_some())
            .field("default_network", &self.default_network)
            .finish()
    }
}

/// Client bundle used when no per-namespace adapter exists.
#[derive(Clone, Default)]
pub struct UniversalAdapter {
    /// Network client shared by every namespace.
    pub network_client: Option<NetworkClientRef>,
    /// Connection client shared by every namespace.
    pub connection_client: Option<ConnectionClientRef>,
}

impl UniversalAdapter {
    /// Bundle with both clients set.
    #[must_use]
    pub fn new(network_client: NetworkClientRef, connection_client: ConnectionClientRef) -> Self {
        Self {
            network_client: Some(network_client),
            connection_client: Some(connection_client),
        }
    }
}

impl PartialEq for UniversalAdapter {
    fn eq(&self, other: &Self) -> bool {
        same_client(&self.network_client, &other.network_client)
            && same_client(&self.connection_client, &other.connection_client)
    }
}

impl fmt::Debug for UniversalAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniversalAdapter")
            .field("network_client", &self.network_client.is_some())
            .field("connection_client", &self.connection_client.is_some())
            .finish()
    }
}
