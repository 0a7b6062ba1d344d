//! # Sign-In Flows
//!
//! A wallet connected through the chain controller signs a SIWX challenge
//! produced by `map_to_siwx`, and the verified session reaches the SIWE
//! backend.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mk_01_chain_controller::{
        account_keys, AccountController, AdapterInit, ChainController, ChainControllerApi,
        ChainControllerConfig, ConnectionClientRef, InMemoryPublicState, MockConnectionClient,
        NetworkController,
    };
    use mk_02_siwx::{
        map_to_siwx, map_to_siwx_guarded, InMemoryNonceIssuer, MessengerConfig, MockSiweClient,
        NonceError, NonceIssuerConfig, SignInData, SiweMessageParams, SiwxConfig, SiwxError,
        SiwxMessageInput, SiwxSession, StorageError, VerificationError,
    };
    use shared_types::{
        AccountUpdate, CaipAddress, CaipChainId, ChainNamespace, NativeChainId,
    };

    use crate::init_test_logging;

    fn wallet_address() -> CaipAddress {
        CaipAddress::parse("eip155:1:0xABC").unwrap()
    }

    fn example_backend() -> MockSiweClient {
        MockSiweClient::new("0xABC")
            .with_nonce("abc123")
            .with_params(SiweMessageParams {
                domain: Some("example.com".to_string()),
                uri: Some("https://example.com".to_string()),
                ..SiweMessageParams::default()
            })
    }

    /// Controller with one connected EVM wallet.
    fn connected_controller() -> ChainController {
        init_test_logging();
        let controller = ChainController::new(
            ChainControllerConfig::default(),
            AccountController::new(),
            NetworkController::new(),
            Arc::new(InMemoryPublicState::new()),
        );
        let wallet: ConnectionClientRef = Arc::new(MockConnectionClient::new(wallet_address()));
        controller
            .initialize(vec![
                AdapterInit::new(ChainNamespace::EIP155).with_connection_client(wallet)
            ])
            .unwrap();
        controller
            .set_chain_account_data(
                Some(&ChainNamespace::EIP155),
                AccountUpdate::connected(wallet_address()),
                true,
            )
            .unwrap();
        controller
    }

    /// Challenge for the connected account, signed by its wallet.
    async fn sign_challenge(
        controller: &ChainController,
        siwx: &dyn SiwxConfig,
        chain_id: CaipChainId,
    ) -> SiwxSession {
        let address = controller
            .get_account_prop(account_keys::ADDRESS, None)
            .flatten()
            .unwrap();
        let message = siwx
            .create_message(&SiwxMessageInput::new(address, chain_id))
            .await
            .unwrap();

        let wallet = controller.get_connection_controller_client(None).unwrap();
        let signature = wallet.sign_message(&message.to_string()).await.unwrap();
        SiwxSession::new(&message, signature)
    }

    #[tokio::test]
    async fn test_wallet_signs_in() {
        let controller = connected_controller();
        let backend = Arc::new(example_backend());
        let siwx = map_to_siwx(backend.clone()).await;

        let session = sign_challenge(&controller, &siwx, CaipChainId::evm(1)).await;
        let text = session.message.clone();
        assert!(text.starts_with(
            "example.com wants you to sign in with your **blockchain** account:\n0xABC\n\n"
        ));
        assert!(text.contains("URI: https://example.com\nVersion: 1\nChain ID: eip155:1\nNonce: abc123"));

        siwx.add_session(session.clone()).await.unwrap();

        assert_eq!(session.native_chain_id(), NativeChainId::Numeric(1));
        assert_eq!(
            backend.sign_ins(),
            vec![SignInData {
                address: "0xABC".to_string(),
                chain_id: 1,
            }]
        );
        assert_eq!(backend.nonce_requests(), vec!["0xABC".to_string()]);

        let current = siwx.get_sessions(&CaipChainId::evm(1), "0xABC").await.unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].data.account_address, "0xABC");
    }

    #[tokio::test]
    async fn test_bitcoin_session_has_no_verifier() {
        let controller = connected_controller();
        let backend = Arc::new(example_backend());
        let siwx = map_to_siwx(backend.clone()).await;
        let bitcoin = CaipChainId::parse("bip122:000000000019d6689c085ae165831e93").unwrap();

        let session = sign_challenge(&controller, &siwx, bitcoin.clone()).await;
        let err = siwx.add_session(session).await.unwrap_err();

        assert_eq!(
            err,
            SiwxError::Verification(VerificationError::NoMatchingVerifier { chain_id: bitcoin })
        );
        assert!(backend.sign_ins().is_empty());
    }

    #[tokio::test]
    async fn test_guarded_nonce_is_single_use() {
        let controller = connected_controller();
        let backend = Arc::new(example_backend());
        let issuer = Arc::new(InMemoryNonceIssuer::new(NonceIssuerConfig::for_testing()));
        let siwx =
            map_to_siwx_guarded(backend.clone(), Arc::clone(&issuer), &MessengerConfig::default())
                .await;

        let session = sign_challenge(&controller, &siwx, CaipChainId::evm(1)).await;
        assert_ne!(session.data.nonce, "abc123");

        siwx.add_session(session.clone()).await.unwrap();
        assert_eq!(issuer.outstanding(), 0);

        let err = siwx.add_session(session).await.unwrap_err();
        assert!(matches!(
            err,
            SiwxError::Verification(VerificationError::Replay(NonceError::NonceReused { .. }))
        ));
        assert_eq!(backend.sign_ins().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_resets_account() {
        let controller = connected_controller();
        let backend = Arc::new(example_backend());
        let siwx = map_to_siwx(backend.clone()).await;

        let session = sign_challenge(&controller, &siwx, CaipChainId::evm(1)).await;
        siwx.add_session(session).await.unwrap();

        siwx.revoke_session(&CaipChainId::evm(1), "0xABC").await.unwrap();
        controller.reset_account(None).unwrap();

        assert_eq!(backend.sign_outs(), 1);
        assert!(siwx
            .get_sessions(&CaipChainId::evm(1), "0xABC")
            .await
            .unwrap()
            .is_empty());
        assert!(!controller.account_store().get(account_keys::IS_CONNECTED));
    }

    #[tokio::test]
    async fn test_refused_sign_out_keeps_session() {
        let controller = connected_controller();
        let backend = Arc::new(example_backend().refusing_sign_out());
        let siwx = map_to_siwx(backend.clone()).await;

        let session = sign_challenge(&controller, &siwx, CaipChainId::evm(1)).await;
        siwx.add_session(session).await.unwrap();

        let err = siwx
            .revoke_session(&CaipChainId::evm(1), "0xABC")
            .await
            .unwrap_err();
        assert_eq!(err, SiwxError::Storage(StorageError::SignOutFailed));
        assert_eq!(backend.sign_outs(), 0);
        assert_eq!(
            siwx.get_sessions(&CaipChainId::evm(1), "0xABC").await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_unreadable_backend_reports_no_sessions() {
        init_test_logging();
        let backend = Arc::new(example_backend().failing_session_read());
        let siwx = map_to_siwx(backend).await;

        let sessions = siwx.get_sessions(&CaipChainId::evm(1), "0xABC").await.unwrap();
        assert!(sessions.is_empty());
    }
}
