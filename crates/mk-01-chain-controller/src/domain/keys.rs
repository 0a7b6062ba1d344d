//! # State Keys
//!
//! Typed keys for property reads and per-key subscriptions.

/// Keys into [`shared_types::AccountState`].
pub mod account_keys {
    use shared_bus::StateKey;
    use shared_types::{
        AccountEntry, AccountState, AccountType, CaipAddress, ConnectedWalletInfo, TokenBalance,
    };
    use std::collections::BTreeMap;

    type Key<T> = StateKey<AccountState, T>;

    /// Whether a wallet is connected.
    pub const IS_CONNECTED: Key<bool> = StateKey::new("isConnected", |s| s.is_connected);
    /// Selected account tab.
    pub const CURRENT_TAB: Key<u32> = StateKey::new("currentTab", |s| s.current_tab);
    /// Connected account as a CAIP-10 address.
    pub const CAIP_ADDRESS: Key<Option<CaipAddress>> =
        StateKey::new("caipAddress", |s| s.caip_address.clone());
    /// Connected account, namespace-native form.
    pub const ADDRESS: Key<Option<String>> = StateKey::new("address", |s| s.address.clone());
    /// Every account the wallet exposes.
    pub const ALL_ACCOUNTS: Key<Vec<AccountEntry>> =
        StateKey::new("allAccounts", |s| s.all_accounts.clone());
    /// Native balance, display formatted.
    pub const BALANCE: Key<Option<String>> = StateKey::new("balance", |s| s.balance.clone());
    /// Symbol of the native balance.
    pub const BALANCE_SYMBOL: Key<Option<String>> =
        StateKey::new("balanceSymbol", |s| s.balance_symbol.clone());
    /// Resolved profile name.
    pub const PROFILE_NAME: Key<Option<String>> =
        StateKey::new("profileName", |s| s.profile_name.clone());
    /// Resolved profile avatar.
    pub const PROFILE_IMAGE: Key<Option<String>> =
        StateKey::new("profileImage", |s| s.profile_image.clone());
    /// Explorer link for the account.
    pub const ADDRESS_EXPLORER_URL: Key<Option<String>> =
        StateKey::new("addressExplorerUrl", |s| s.address_explorer_url.clone());
    /// Token balances.
    pub const TOKEN_BALANCE: Key<Vec<TokenBalance>> =
        StateKey::new("tokenBalance", |s| s.token_balance.clone());
    /// Whether the smart account is deployed.
    pub const SMART_ACCOUNT_DEPLOYED: Key<bool> =
        StateKey::new("smartAccountDeployed", |s| s.smart_account_deployed);
    /// Preferred account type.
    pub const PREFERRED_ACCOUNT_TYPE: Key<Option<AccountType>> =
        StateKey::new("preferredAccountType", |s| s.preferred_account_type);
    /// User labels keyed by address.
    pub const ADDRESS_LABELS: Key<BTreeMap<String, String>> =
        StateKey::new("addressLabels", |s| s.address_labels.clone());
    /// Wallet metadata.
    pub const CONNECTED_WALLET_INFO: Key<Option<ConnectedWalletInfo>> =
        StateKey::new("connectedWalletInfo", |s| s.connected_wallet_info.clone());
    /// Social login provider.
    pub const SOCIAL_PROVIDER: Key<Option<String>> =
        StateKey::new("socialProvider", |s| s.social_provider.clone());
    /// Farcaster profile URL.
    pub const FARCASTER_URL: Key<Option<String>> =
        StateKey::new("farcasterUrl", |s| s.farcaster_url.clone());
}

/// Keys into [`shared_types::NetworkState`].
pub mod network_keys {
    use shared_bus::StateKey;
    use shared_types::{CaipChainId, CaipNetwork, NetworkState};
    use std::sync::Arc;

    type Key<T> = StateKey<NetworkState, T>;

    /// Chain descriptor of the namespace.
    pub const CAIP_NETWORK: Key<Option<Arc<CaipNetwork>>> =
        StateKey::new("caipNetwork", |s| s.caip_network.clone());
    /// Whether the descriptor is the configured default.
    pub const IS_DEFAULT_CAIP_NETWORK: Key<bool> =
        StateKey::new("isDefaultCaipNetwork", |s| s.is_default_caip_network);
    /// Networks the application asked for.
    pub const REQUESTED_CAIP_NETWORKS: Key<Vec<CaipNetwork>> =
        StateKey::new("requestedCaipNetworks", |s| s.requested_caip_networks.clone());
    /// Networks the wallet approved.
    pub const APPROVED_CAIP_NETWORK_IDS: Key<Vec<CaipChainId>> =
        StateKey::new("approvedCaipNetworkIds", |s| s.approved_caip_network_ids.clone());
    /// Whether the wallet accepts any network.
    pub const SUPPORTS_ALL_NETWORKS: Key<bool> =
        StateKey::new("supportsAllNetworks", |s| s.supports_all_networks);
    /// Chain ids with smart accounts enabled.
    pub const SMART_ACCOUNT_ENABLED_NETWORKS: Key<Vec<u64>> = StateKey::new(
        "smartAccountEnabledNetworks",
        |s| s.smart_account_enabled_networks.clone(),
    );
    /// Whether unsupported chains may stay selected.
    pub const ALLOW_UNSUPPORTED_CHAIN: Key<bool> =
        StateKey::new("allowUnsupportedChain", |s| s.allow_unsupported_chain);
}

/// Keys into [`crate::ChainControllerState`].
pub mod controller_keys {
    use crate::domain::ChainControllerState;
    use shared_bus::StateKey;
    use shared_types::{CaipNetwork, ChainNamespace, Connector};
    use std::sync::Arc;

    type Key<T> = StateKey<ChainControllerState, T>;

    /// Multi-chain flag.
    pub const MULTI_CHAIN_ENABLED: Key<bool> =
        StateKey::new("multiChainEnabled", |s| s.multi_chain_enabled);
    /// Active namespace.
    pub const ACTIVE_CHAIN: Key<Option<ChainNamespace>> =
        StateKey::new("activeChain", |s| s.active_chain.clone());
    /// Active chain descriptor.
    pub const ACTIVE_CAIP_NETWORK: Key<Option<Arc<CaipNetwork>>> =
        StateKey::new("activeCaipNetwork", |s| s.active_caip_network.clone());
    /// Connector in use.
    pub const ACTIVE_CONNECTOR: Key<Option<Connector>> =
        StateKey::new("activeConnector", |s| s.active_connector.clone());
    /// Universal-adapter-only flag.
    pub const IS_UNIVERSAL_ADAPTER_ONLY: Key<bool> =
        StateKey::new("isUniversalAdapterOnly", |s| s.is_universal_adapter_only);
    /// Number of registered adapters.
    pub const CHAIN_COUNT: Key<usize> = StateKey::new("chains", |s| s.chains.len());
}

/// Keys into [`crate::ChainAdapter`], for `subscribe_chain_prop`.
pub mod adapter_keys {
    use crate::domain::ChainAdapter;
    use shared_bus::StateKey;
    use shared_types::{AccountState, NetworkState};

    type Key<T> = StateKey<ChainAdapter, T>;

    /// Account snapshot of the adapter.
    pub const ACCOUNT_STATE: Key<AccountState> =
        StateKey::new("accountState", |a| a.account_state.clone());
    /// Network snapshot of the adapter.
    pub const NETWORK_STATE: Key<NetworkState> =
        StateKey::new("networkState", |a| a.network_state.clone());
    /// Whether a network client is set.
    pub const HAS_NETWORK_CLIENT: Key<bool> =
        StateKey::new("networkControllerClient", |a| a.has_network_client());
    /// Whether a connection client is set.
    pub const HAS_CONNECTION_CLIENT: Key<bool> =
        StateKey::new("connectionControllerClient", |a| a.has_connection_client());
}
