//! # Domain Entities
//!
//! Chain descriptors and the per-namespace account/network snapshots.
//!
//! Snapshots are plain values. Updates never mutate a snapshot in place:
//! `merged` returns a new snapshot with the partial update applied on top.

use crate::caip::{CaipAddress, CaipChainId};
use crate::namespace::ChainNamespace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

// =============================================================================
// Chain descriptor
// =============================================================================

/// Chain descriptor (a "CAIP network").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaipNetwork {
    /// Namespace-qualified chain id.
    pub id: CaipChainId,
    /// Human readable name.
    pub name: String,
    /// Native currency symbol.
    pub currency: String,
    /// Block explorer base URL.
    pub explorer_url: String,
    /// RPC endpoint.
    pub rpc_url: String,
    /// Asset id for the chain icon.
    pub image_id: Option<String>,
    /// Direct chain icon URL.
    pub image_url: Option<String>,
}

impl CaipNetwork {
    /// Create a descriptor with empty endpoints.
    pub fn new(id: CaipChainId, name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            currency: currency.into(),
            explorer_url: String::new(),
            rpc_url: String::new(),
            image_id: None,
            image_url: None,
        }
    }

    /// Set the explorer URL.
    pub fn with_explorer_url(mut self, url: impl Into<String>) -> Self {
        self.explorer_url = url.into();
        self
    }

    /// Set the RPC URL.
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    /// Namespace tag of this chain.
    pub fn chain_namespace(&self) -> &ChainNamespace {
        self.id.namespace()
    }
}

// =============================================================================
// Account snapshot
// =============================================================================

/// Preferred account kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    /// Externally owned account.
    Eoa,
    /// Smart contract account.
    SmartAccount,
}

/// One of the accounts exposed by the connected wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Namespace the account belongs to.
    pub namespace: ChainNamespace,
    /// Plain address.
    pub address: String,
    /// Account kind.
    pub account_type: AccountType,
}

/// Token balance line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Chain the balance lives on.
    pub chain_id: CaipChainId,
    /// Decimal quantity as reported by the balance backend.
    pub quantity: String,
}

/// Display metadata of the connected wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedWalletInfo {
    /// Wallet name.
    pub name: String,
    /// Wallet icon URL.
    pub icon: Option<String>,
}

/// Connector the user picked to connect a wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    /// Connector id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Namespace the connector serves.
    pub chain: ChainNamespace,
}

/// Per-namespace account snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Whether a wallet is connected.
    pub is_connected: bool,
    /// Selected account tab in the UI.
    pub current_tab: u32,
    /// Connected CAIP-10 address.
    pub caip_address: Option<CaipAddress>,
    /// Connected plain address.
    pub address: Option<String>,
    /// All accounts of the connected wallet.
    pub all_accounts: Vec<AccountEntry>,
    /// Native balance.
    pub balance: Option<String>,
    /// Native balance symbol.
    pub balance_symbol: Option<String>,
    /// Resolved profile name.
    pub profile_name: Option<String>,
    /// Resolved profile image.
    pub profile_image: Option<String>,
    /// Explorer link for the address.
    pub address_explorer_url: Option<String>,
    /// Token balances.
    pub token_balance: Vec<TokenBalance>,
    /// Whether the smart account is deployed.
    pub smart_account_deployed: bool,
    /// Preferred account kind.
    pub preferred_account_type: Option<AccountType>,
    /// Address -> label.
    pub address_labels: BTreeMap<String, String>,
    /// Connected wallet metadata.
    pub connected_wallet_info: Option<ConnectedWalletInfo>,
    /// Social login provider.
    pub social_provider: Option<String>,
    /// Farcaster login URL.
    pub farcaster_url: Option<String>,
}

impl Default for AccountState {
    /// Neutral, disconnected snapshot.
    fn default() -> Self {
        Self {
            is_connected: false,
            current_tab: 0,
            caip_address: None,
            address: None,
            all_accounts: Vec::new(),
            balance: None,
            balance_symbol: None,
            profile_name: None,
            profile_image: None,
            address_explorer_url: None,
            token_balance: Vec::new(),
            smart_account_deployed: false,
            preferred_account_type: None,
            address_labels: BTreeMap::new(),
            connected_wallet_info: None,
            social_provider: None,
            farcaster_url: None,
        }
    }
}

impl AccountState {
    /// New snapshot with `update` applied on top of `self`.
    pub fn merged(&self, update: &AccountUpdate) -> Self {
        let mut next = self.clone();
        if let Some(v) = update.is_connected {
            next.is_connected = v;
        }
        if let Some(v) = update.current_tab {
            next.current_tab = v;
        }
        if let Some(v) = &update.caip_address {
            next.caip_address = v.clone();
        }
        if let Some(v) = &update.address {
            next.address = v.clone();
        }
        if let Some(v) = &update.all_accounts {
            next.all_accounts = v.clone();
        }
        if let Some(v) = &update.balance {
            next.balance = v.clone();
        }
        if let Some(v) = &update.balance_symbol {
            next.balance_symbol = v.clone();
        }
        if let Some(v) = &update.profile_name {
            next.profile_name = v.clone();
        }
        if let Some(v) = &update.profile_image {
            next.profile_image = v.clone();
        }
        if let Some(v) = &update.address_explorer_url {
            next.address_explorer_url = v.clone();
        }
        if let Some(v) = &update.token_balance {
            next.token_balance = v.clone();
        }
        if let Some(v) = update.smart_account_deployed {
            next.smart_account_deployed = v;
        }
        if let Some(v) = update.preferred_account_type {
            next.preferred_account_type = v;
        }
        if let Some(v) = &update.address_labels {
            next.address_labels = v.clone();
        }
        if let Some(v) = &update.connected_wallet_info {
            next.connected_wallet_info = v.clone();
        }
        if let Some(v) = &update.social_provider {
            next.social_provider = v.clone();
        }
        if let Some(v) = &update.farcaster_url {
            next.farcaster_url = v.clone();
        }
        next
    }
}

/// Partial account update. `None` leaves a field untouched; for optional
/// fields `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub is_connected: Option<bool>,
    pub current_tab: Option<u32>,
    pub caip_address: Option<Option<CaipAddress>>,
    pub address: Option<Option<String>>,
    pub all_accounts: Option<Vec<AccountEntry>>,
    pub balance: Option<Option<String>>,
    pub balance_symbol: Option<Option<String>>,
    pub profile_name: Option<Option<String>>,
    pub profile_image: Option<Option<String>>,
    pub address_explorer_url: Option<Option<String>>,
    pub token_balance: Option<Vec<TokenBalance>>,
    pub smart_account_deployed: Option<bool>,
    pub preferred_account_type: Option<Option<AccountType>>,
    pub address_labels: Option<BTreeMap<String, String>>,
    pub connected_wallet_info: Option<Option<ConnectedWalletInfo>>,
    pub social_provider: Option<Option<String>>,
    pub farcaster_url: Option<Option<String>>,
}

impl AccountUpdate {
    /// Update that resets every field to the neutral, disconnected value.
    pub fn reset() -> Self {
        Self {
            is_connected: Some(false),
            current_tab: Some(0),
            caip_address: Some(None),
            address: Some(None),
            all_accounts: Some(Vec::new()),
            balance: Some(None),
            balance_symbol: Some(None),
            profile_name: Some(None),
            profile_image: Some(None),
            address_explorer_url: Some(None),
            token_balance: Some(Vec::new()),
            smart_account_deployed: Some(false),
            preferred_account_type: Some(None),
            address_labels: Some(BTreeMap::new()),
            connected_wallet_info: Some(None),
            social_provider: Some(None),
            farcaster_url: Some(None),
        }
    }

    /// Mark the account connected at `caip_address`.
    pub fn connected(caip_address: CaipAddress) -> Self {
        Self {
            is_connected: Some(true),
            address: Some(Some(caip_address.address().to_string())),
            caip_address: Some(Some(caip_address)),
            ..Self::default()
        }
    }
}

/// Single account property assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountProp {
    IsConnected(bool),
    CurrentTab(u32),
    CaipAddress(Option<CaipAddress>),
    Address(Option<String>),
    AllAccounts(Vec<AccountEntry>),
    Balance(Option<String>),
    BalanceSymbol(Option<String>),
    ProfileName(Option<String>),
    ProfileImage(Option<String>),
    AddressExplorerUrl(Option<String>),
    TokenBalance(Vec<TokenBalance>),
    SmartAccountDeployed(bool),
    PreferredAccountType(Option<AccountType>),
    AddressLabels(BTreeMap<String, String>),
    ConnectedWalletInfo(Option<ConnectedWalletInfo>),
    SocialProvider(Option<String>),
    FarcasterUrl(Option<String>),
}

impl From<AccountProp> for AccountUpdate {
    fn from(prop: AccountProp) -> Self {
        let mut update = AccountUpdate::default();
        match prop {
            AccountProp::IsConnected(v) => update.is_connected = Some(v),
            AccountProp::CurrentTab(v) => update.current_tab = Some(v),
            AccountProp::CaipAddress(v) => update.caip_address = Some(v),
            AccountProp::Address(v) => update.address = Some(v),
            AccountProp::AllAccounts(v) => update.all_accounts = Some(v),
            AccountProp::Balance(v) => update.balance = Some(v),
            AccountProp::BalanceSymbol(v) => update.balance_symbol = Some(v),
            AccountProp::ProfileName(v) => update.profile_name = Some(v),
            AccountProp::ProfileImage(v) => update.profile_image = Some(v),
            AccountProp::AddressExplorerUrl(v) => update.address_explorer_url = Some(v),
            AccountProp::TokenBalance(v) => update.token_balance = Some(v),
            AccountProp::SmartAccountDeployed(v) => update.smart_account_deployed = Some(v),
            AccountProp::PreferredAccountType(v) => update.preferred_account_type = Some(v),
            AccountProp::AddressLabels(v) => update.address_labels = Some(v),
            AccountProp::ConnectedWalletInfo(v) => update.connected_wallet_info = Some(v),
            AccountProp::SocialProvider(v) => update.social_provider = Some(v),
            AccountProp::FarcasterUrl(v) => update.farcaster_url = Some(v),
        }
        update
    }
}

// =============================================================================
// Network snapshot
// =============================================================================

/// Per-namespace network snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkState {
    /// Current chain descriptor, shared with the controller's active network.
    pub caip_network: Option<Arc<CaipNetwork>>,
    /// Whether `caip_network` is the configured default.
    pub is_default_caip_network: bool,
    /// Networks the application asked for.
    pub requested_caip_networks: Vec<CaipNetwork>,
    /// Networks the connected wallet approved.
    pub approved_caip_network_ids: Vec<CaipChainId>,
    /// Whether the wallet supports every network.
    pub supports_all_networks: bool,
    /// EVM chain ids with smart accounts enabled.
    pub smart_account_enabled_networks: Vec<u64>,
    /// Whether an unsupported chain may stay selected.
    pub allow_unsupported_chain: bool,
}

impl Default for NetworkState {
    /// Neutral snapshot.
    fn default() -> Self {
        Self {
            caip_network: None,
            is_default_caip_network: false,
            requested_caip_networks: Vec::new(),
            approved_caip_network_ids: Vec::new(),
            supports_all_networks: true,
            smart_account_enabled_networks: Vec::new(),
            allow_unsupported_chain: false,
        }
    }
}

impl NetworkState {
    /// New snapshot with `update` applied on top of `self`.
    pub fn merged(&self, update: &NetworkUpdate) -> Self {
        let mut next = self.clone();
        if let Some(v) = &update.caip_network {
            next.caip_network = v.clone();
        }
        if let Some(v) = update.is_default_caip_network {
            next.is_default_caip_network = v;
        }
        if let Some(v) = &update.requested_caip_networks {
            next.requested_caip_networks = v.clone();
        }
        if let Some(v) = &update.approved_caip_network_ids {
            next.approved_caip_network_ids = v.clone();
        }
        if let Some(v) = update.supports_all_networks {
            next.supports_all_networks = v;
        }
        if let Some(v) = &update.smart_account_enabled_networks {
            next.smart_account_enabled_networks = v.clone();
        }
        if let Some(v) = update.allow_unsupported_chain {
            next.allow_unsupported_chain = v;
        }
        next
    }
}

/// Partial network update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkUpdate {
    pub caip_network: Option<Option<Arc<CaipNetwork>>>,
    pub is_default_caip_network: Option<bool>,
    pub requested_caip_networks: Option<Vec<CaipNetwork>>,
    pub approved_caip_network_ids: Option<Vec<CaipChainId>>,
    pub supports_all_networks: Option<bool>,
    pub smart_account_enabled_networks: Option<Vec<u64>>,
    pub allow_unsupported_chain: Option<bool>,
}

impl NetworkUpdate {
    /// Update that only sets the current chain descriptor.
    pub fn caip_network(network: Option<Arc<CaipNetwork>>) -> Self {
        Self {
            caip_network: Some(network),
            ..Self::default()
        }
    }

    /// Update that only sets the approved network ids.
    pub fn approved(ids: Vec<CaipChainId>) -> Self {
        Self {
            approved_caip_network_ids: Some(ids),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mainnet() -> Arc<CaipNetwork> {
        Arc::new(
            CaipNetwork::new(CaipChainId::evm(1), "Ethereum", "ETH")
                .with_explorer_url("https://etherscan.io"),
        )
    }

    #[test]
    fn test_account_default_is_disconnected() {
        let state = AccountState::default();
        assert!(!state.is_connected);
        assert_eq!(state.current_tab, 0);
        assert!(state.address_labels.is_empty());
    }

    #[test]
    fn test_account_merge_is_shallow_and_new() {
        let base = AccountState::default();
        let update = AccountUpdate {
            is_connected: Some(true),
            address: Some(Some("0xABC".to_string())),
            ..AccountUpdate::default()
        };

        let next = base.merged(&update);
        assert!(next.is_connected);
        assert_eq!(next.address.as_deref(), Some("0xABC"));
        // Base untouched
        assert!(!base.is_connected);
        assert_eq!(next.current_tab, base.current_tab);
    }

    #[test]
    fn test_account_reset_clears_everything() {
        let connected = AccountState::default()
            .merged(&AccountUpdate::connected(CaipAddress::parse("eip155:1:0xABC").unwrap()))
            .merged(&AccountProp::Balance(Some("1.5".to_string())).into())
            .merged(&AccountProp::CurrentTab(2).into());

        assert!(connected.is_connected);
        assert_eq!(connected.merged(&AccountUpdate::reset()), AccountState::default());
    }

    #[test]
    fn test_account_prop_clears_optional_field() {
        let state = AccountState::default().merged(&AccountProp::ProfileName(Some("vitalik".into())).into());
        assert_eq!(state.profile_name.as_deref(), Some("vitalik"));

        let cleared = state.merged(&AccountProp::ProfileName(None).into());
        assert!(cleared.profile_name.is_none());
    }

    #[test]
    fn test_network_default() {
        let state = NetworkState::default();
        assert!(state.supports_all_networks);
        assert!(!state.is_default_caip_network);
        assert!(state.caip_network.is_none());
    }

    #[test]
    fn test_network_merge_shares_descriptor() {
        let network = mainnet();
        let state = NetworkState::default().merged(&NetworkUpdate::caip_network(Some(network.clone())));

        let held = state.caip_network.as_ref().unwrap();
        assert!(Arc::ptr_eq(held, &network));
        assert_eq!(held.chain_namespace(), &ChainNamespace::EIP155);
    }
}
