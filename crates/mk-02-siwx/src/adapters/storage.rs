//! # SIWE Session Storage
//!
//! [`SiwxStorage`] over a SIWE backend that knows at most one current
//! session. Reads never fail: a backend error reads as "no session".

use crate::domain::{SiwxError, SiwxMessageData, SiwxSession, StorageError};
use crate::ports::{SignInData, SiweClient, SiwxStorage};
use async_trait::async_trait;
use shared_types::{parse_evm_chain_id, CaipChainId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// [`SiwxStorage`] backed by the SIWE client's session hooks.
pub struct SiweStorage {
    client: Arc<dyn SiweClient>,
}

impl SiweStorage {
    /// Storage over `client`.
    pub fn new(client: Arc<dyn SiweClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SiwxStorage for SiweStorage {
    async fn add(&self, session: &SiwxSession) -> Result<(), SiwxError> {
        let chain_id = session.data.chain_id.to_string();
        let native = parse_evm_chain_id(&chain_id).ok_or(SiwxError::InvalidChainId(chain_id))?;

        self.client.on_sign_in(&SignInData {
            address: session.data.account_address.clone(),
            chain_id: native,
        });
        info!(
            chain_id = native,
            address = %session.data.account_address,
            "[mk-02] Signed in"
        );
        Ok(())
    }

    /// Durable multi-session persistence is not kept; only the backend's
    /// current session exists.
    async fn set(&self, _sessions: &[SiwxSession]) -> Result<(), SiwxError> {
        Ok(())
    }

    async fn get(
        &self,
        _chain_id: &CaipChainId,
        _address: &str,
    ) -> Result<Vec<SiwxSession>, SiwxError> {
        let current = match self.client.get_session().await {
            Ok(Some(current)) => current,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => {
                warn!(error = %e, "[mk-02] Session read failed, reporting no session");
                return Ok(Vec::new());
            }
        };

        let chain_id = match CaipChainId::parse(&format!("eip155:{}", current.chain_id)) {
            Ok(chain_id) => chain_id,
            Err(e) => {
                warn!(error = %e, "[mk-02] Stored session has an unusable chain id");
                return Ok(Vec::new());
            }
        };

        debug!(chain_id = %chain_id, address = %current.address, "[mk-02] Session found");
        Ok(vec![SiwxSession {
            data: SiwxMessageData::for_account(current.address, chain_id),
            message: String::new(),
            signature: String::new(),
        }])
    }

    async fn delete(&self, chain_id: &CaipChainId, address: &str) -> Result<(), SiwxError> {
        let signed_out = self
            .client
            .sign_out()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        if !signed_out {
            return Err(StorageError::SignOutFailed.into());
        }

        self.client.on_sign_out();
        info!(chain_id = %chain_id, address = %address, "[mk-02] Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorKind, SiwxMessage};
    use crate::ports::{MockSiweClient, SiweSession};

    fn session(chain_id: CaipChainId) -> SiwxSession {
        SiwxSession::new(
            &SiwxMessage::new(SiwxMessageData::for_account("0xABC", chain_id)),
            "0xsig",
        )
    }

    #[tokio::test]
    async fn test_add_notifies_sign_in() {
        let client = Arc::new(MockSiweClient::new("0xABC"));
        let storage = SiweStorage::new(client.clone());

        storage.add(&session(CaipChainId::evm(137))).await.unwrap();

        let sign_ins = client.sign_ins();
        assert_eq!(sign_ins.len(), 1);
        assert_eq!(sign_ins[0].address, "0xABC");
        assert_eq!(sign_ins[0].chain_id, 137);
    }

    #[tokio::test]
    async fn test_add_rejects_non_numeric_chain_id() {
        let client = Arc::new(MockSiweClient::new("0xABC"));
        let storage = SiweStorage::new(client.clone());
        let solana = CaipChainId::parse("solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp").unwrap();

        let err = storage.add(&session(solana)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(client.sign_ins().is_empty());
    }

    #[tokio::test]
    async fn test_get_reconstructs_current_session() {
        let client = Arc::new(MockSiweClient::new("0xABC").with_session(SiweSession {
            address: "0xABC".to_string(),
            chain_id: 10,
        }));
        let storage = SiweStorage::new(client);

        let sessions = storage.get(&CaipChainId::evm(1), "0xABC").await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].data.chain_id, CaipChainId::evm(10));
        assert_eq!(sessions[0].data.account_address, "0xABC");
        assert!(sessions[0].message.is_empty());
    }

    #[tokio::test]
    async fn test_get_swallows_read_failure() {
        let storage = SiweStorage::new(Arc::new(
            MockSiweClient::new("0xABC").failing_session_read(),
        ));
        assert!(storage
            .get(&CaipChainId::evm(1), "0xABC")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_get_without_session_is_empty() {
        let storage = SiweStorage::new(Arc::new(MockSiweClient::new("0xABC")));
        assert!(storage
            .get(&CaipChainId::evm(1), "0xABC")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_set_is_noop() {
        let client = Arc::new(MockSiweClient::new("0xABC"));
        let storage = SiweStorage::new(client.clone());

        storage.set(&[session(CaipChainId::evm(1))]).await.unwrap();
        assert!(client.sign_ins().is_empty());
    }

    #[tokio::test]
    async fn test_delete_signs_out() {
        let client = Arc::new(MockSiweClient::new("0xABC"));
        let storage = SiweStorage::new(client.clone());

        storage.delete(&CaipChainId::evm(1), "0xABC").await.unwrap();
        assert_eq!(client.sign_outs(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_refused_sign_out() {
        let client = Arc::new(MockSiweClient::new("0xABC").refusing_sign_out());
        let storage = SiweStorage::new(client.clone());

        let err = storage.delete(&CaipChainId::evm(1), "0xABC").await.unwrap_err();
        assert_eq!(err, SiwxError::Storage(StorageError::SignOutFailed));
        assert_eq!(client.sign_outs(), 0);
    }
}
