//! # Chain Controller Flows
//!
//! Tests that the chain controller, the global account/network stores and
//! the public state stay consistent through realistic wallet sessions.
//!
//! ## Flows Tested:
//!
//! 1. **Connect**: wallet connects on `eip155`, account store observers see it
//! 2. **Namespace switch**: stores follow the active namespace and come back
//! 3. **Network switch**: network client is asked first, then state follows
//! 4. **Universal adapter**: one client bundle serves every namespace

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use mk_01_chain_controller::{
        account_keys, controller_keys, network_keys, AccountController, AdapterInit,
        ChainController, ChainControllerApi, ChainControllerConfig, ChainControllerError,
        ConnectionClientRef, InMemoryPublicState, MockConnectionClient, MockNetworkClient,
        NetworkClientRef, NetworkController, UniversalAdapter,
    };
    use shared_types::{
        AccountProp, AccountUpdate, CaipAddress, CaipChainId, CaipNetwork, ChainNamespace,
        Connector,
    };

    use crate::init_test_logging;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Harness {
        controller: ChainController,
        accounts: AccountController,
        networks: NetworkController,
        public: InMemoryPublicState,
        evm_network: Arc<MockNetworkClient>,
        evm_wallet: Arc<MockConnectionClient>,
    }

    fn ethereum() -> Arc<CaipNetwork> {
        Arc::new(
            CaipNetwork::new(CaipChainId::evm(1), "Ethereum", "ETH")
                .with_explorer_url("https://etherscan.io"),
        )
    }

    fn base() -> Arc<CaipNetwork> {
        Arc::new(CaipNetwork::new(CaipChainId::evm(8453), "Base", "ETH"))
    }

    fn solana() -> Arc<CaipNetwork> {
        let id = CaipChainId::parse("solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp").unwrap();
        Arc::new(CaipNetwork::new(id, "Solana", "SOL"))
    }

    fn evm_account() -> CaipAddress {
        CaipAddress::parse("eip155:1:0xABC").unwrap()
    }

    /// EVM adapter with mock clients plus a Solana adapter, single-chain mode.
    fn harness(config: ChainControllerConfig) -> Harness {
        init_test_logging();

        let accounts = AccountController::new();
        let networks = NetworkController::new();
        let public = InMemoryPublicState::new();
        let controller = ChainController::new(
            config,
            accounts.clone(),
            networks.clone(),
            Arc::new(public.clone()),
        );

        let evm_network = Arc::new(MockNetworkClient::approving(vec![
            CaipChainId::evm(1),
            CaipChainId::evm(8453),
        ]));
        let evm_wallet = Arc::new(MockConnectionClient::new(evm_account()));

        controller
            .initialize(vec![
                AdapterInit::new(ChainNamespace::EIP155)
                    .with_network_client(Arc::clone(&evm_network) as NetworkClientRef)
                    .with_connection_client(Arc::clone(&evm_wallet) as ConnectionClientRef)
                    .with_default_network(ethereum()),
                AdapterInit::new(ChainNamespace::SOLANA).with_default_network(solana()),
            ])
            .unwrap();

        Harness {
            controller,
            accounts,
            networks,
            public,
            evm_network,
            evm_wallet,
        }
    }

    async fn connect_evm(h: &Harness) {
        let connector = Connector {
            id: "injected".to_string(),
            name: "Browser Wallet".to_string(),
            chain: ChainNamespace::EIP155,
        };
        let wallet = h
            .controller
            .get_connection_controller_client(Some(&ChainNamespace::EIP155))
            .unwrap();
        let address = wallet.connect_external(&connector).await.unwrap();

        h.controller.set_active_connector(Some(connector));
        h.controller
            .set_chain_account_data(
                Some(&ChainNamespace::EIP155),
                AccountUpdate::connected(address),
                true,
            )
            .unwrap();
    }

    // =============================================================================
    // FLOW 1: CONNECT
    // =============================================================================

    #[tokio::test]
    async fn test_connect_reaches_account_observers() {
        let h = harness(ChainControllerConfig::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = h
            .accounts
            .subscribe_key(account_keys::CAIP_ADDRESS, move |address| {
                sink.lock().push(address.clone());
            });

        connect_evm(&h).await;

        assert_eq!(*seen.lock(), vec![Some(evm_account())]);
        assert!(h.accounts.get(account_keys::IS_CONNECTED));
        assert_eq!(h.accounts.get(account_keys::ADDRESS), Some("0xABC".to_string()));
        assert!(h.controller.state().active_connector.is_some());
    }

    #[tokio::test]
    async fn test_sync_then_switch_network() {
        let h = harness(ChainControllerConfig::default());
        connect_evm(&h).await;

        let approved = h.controller.sync_approved_networks(None).await.unwrap();
        assert_eq!(
            h.controller.get_all_approved_caip_networks(),
            approved
        );
        assert_eq!(h.networks.get(network_keys::APPROVED_CAIP_NETWORK_IDS), approved);

        h.controller.switch_active_network(base()).await.unwrap();

        assert_eq!(h.evm_network.switched(), vec![CaipChainId::evm(8453)]);
        assert_eq!(h.controller.active_caip_network(), Some(base()));
        assert_eq!(h.networks.get(network_keys::CAIP_NETWORK), Some(base()));
        assert_eq!(
            h.public.state().selected_network_id,
            Some(CaipChainId::evm(8453))
        );
    }

    // =============================================================================
    // FLOW 2: NAMESPACE SWITCH
    // =============================================================================

    #[tokio::test]
    async fn test_stores_follow_active_namespace() {
        let h = harness(ChainControllerConfig::default());
        connect_evm(&h).await;

        h.controller.set_active_chain(Some(&ChainNamespace::SOLANA));
        assert!(!h.accounts.get(account_keys::IS_CONNECTED));
        assert_eq!(h.networks.get(network_keys::CAIP_NETWORK), Some(solana()));
        assert_eq!(h.public.state().active_chain, Some(ChainNamespace::SOLANA));

        h.controller.set_active_chain(Some(&ChainNamespace::EIP155));
        assert!(h.accounts.get(account_keys::IS_CONNECTED));
        assert_eq!(h.networks.get(network_keys::CAIP_NETWORK), Some(ethereum()));
        assert_eq!(
            h.public.state().selected_network_id,
            Some(CaipChainId::evm(1))
        );
    }

    #[tokio::test]
    async fn test_selecting_foreign_network_switches_namespace() {
        let h = harness(ChainControllerConfig::default());
        let chains = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&chains);
        let _sub = h
            .controller
            .subscribe_key(controller_keys::ACTIVE_CHAIN, move |chain| {
                sink.lock().push(chain.clone());
            });

        h.controller.set_active_caip_network(Some(solana()));

        assert_eq!(*chains.lock(), vec![Some(ChainNamespace::SOLANA)]);
        assert_eq!(h.controller.active_caip_network(), Some(solana()));
        assert_eq!(h.networks.state().caip_network, Some(solana()));
    }

    #[tokio::test]
    async fn test_account_writes_in_single_chain_mode_hit_active_namespace() {
        let h = harness(ChainControllerConfig::default());

        h.controller
            .set_account_prop(
                AccountProp::ProfileName(Some("alice.eth".to_string())),
                Some(&ChainNamespace::SOLANA),
            )
            .unwrap();

        assert_eq!(
            h.controller
                .get_account_prop(account_keys::PROFILE_NAME, Some(&ChainNamespace::EIP155)),
            Some(Some("alice.eth".to_string()))
        );
        assert_eq!(
            h.accounts.get(account_keys::PROFILE_NAME),
            Some("alice.eth".to_string())
        );
    }

    #[tokio::test]
    async fn test_disconnect_then_reset() {
        let h = harness(ChainControllerConfig::for_testing());
        connect_evm(&h).await;

        let wallet = h.controller.get_connection_controller_client(None).unwrap();
        wallet.disconnect().await.unwrap();
        h.controller.reset_account(Some(&ChainNamespace::EIP155)).unwrap();

        assert_eq!(h.evm_wallet.disconnects(), 1);
        assert_eq!(
            h.controller
                .get_account_prop(account_keys::IS_CONNECTED, Some(&ChainNamespace::EIP155)),
            Some(false)
        );
        assert_eq!(h.accounts.get(account_keys::CAIP_ADDRESS), None);
    }

    // =============================================================================
    // FLOW 3: CONFIGURATION ERRORS
    // =============================================================================

    #[tokio::test]
    async fn test_solana_has_no_clients() {
        let h = harness(ChainControllerConfig::default());
        h.controller.set_active_chain(Some(&ChainNamespace::SOLANA));

        let err = h.controller.switch_active_network(solana()).await.unwrap_err();
        assert_eq!(err, ChainControllerError::NetworkClientNotSet(ChainNamespace::SOLANA));
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Network controller client not set for solana");
    }

    // =============================================================================
    // FLOW 4: UNIVERSAL ADAPTER
    // =============================================================================

    #[tokio::test]
    async fn test_universal_adapter_serves_every_namespace() {
        init_test_logging();
        let public = InMemoryPublicState::new();
        let controller = ChainController::new(
            ChainControllerConfig {
                universal_adapter_only: true,
                ..ChainControllerConfig::default()
            },
            AccountController::new(),
            NetworkController::new(),
            Arc::new(public.clone()),
        );

        assert_eq!(
            controller.get_network_controller_client().err(),
            Some(ChainControllerError::UniversalNetworkClientNotSet)
        );

        let network = Arc::new(MockNetworkClient::default());
        let wallet: ConnectionClientRef = Arc::new(MockConnectionClient::new(evm_account()));
        controller.initialize_universal_adapter(UniversalAdapter::new(
            Arc::clone(&network) as NetworkClientRef,
            wallet,
        ));
        assert_eq!(public.state().active_chain, Some(ChainNamespace::EIP155));

        for namespace in [ChainNamespace::EIP155, ChainNamespace::SOLANA] {
            controller.set_active_chain(Some(&namespace));
            controller.switch_active_network(base()).await.unwrap();
        }

        assert_eq!(network.switched().len(), 2);
        assert!(controller
            .get_connection_controller_client(Some(&ChainNamespace::SOLANA))
            .is_ok());
    }
}
