//! # SIWX Service
//!
//! Dispatches verification to the first matching verifier and persists
//! verified sessions.

use async_trait::async_trait;
use chrono::Utc;
use shared_types::CaipChainId;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{SiwxError, SiwxMessage, SiwxMessageInput, SiwxSession, VerificationError};
use crate::ports::{SiwxConfig, SiwxMessenger, SiwxStorage, SiwxVerifier};

/// Default [`SiwxConfig`] built from a messenger, an ordered verifier list
/// and a storage.
pub struct DefaultSiwx {
    messenger: Arc<dyn SiwxMessenger>,
    verifiers: Vec<Arc<dyn SiwxVerifier>>,
    storage: Arc<dyn SiwxStorage>,
}

impl DefaultSiwx {
    /// Service over `messenger`, `verifiers` (in dispatch order) and `storage`.
    pub fn new(
        messenger: Arc<dyn SiwxMessenger>,
        verifiers: Vec<Arc<dyn SiwxVerifier>>,
        storage: Arc<dyn SiwxStorage>,
    ) -> Self {
        Self {
            messenger,
            verifiers,
            storage,
        }
    }

    /// Verifiers in dispatch order.
    pub fn verifiers(&self) -> &[Arc<dyn SiwxVerifier>] {
        &self.verifiers
    }

    /// Verify `session` with the first verifier accepting it.
    ///
    /// An expired challenge is refused before any verifier runs.
    pub async fn verify_session(&self, session: &SiwxSession) -> Result<(), VerificationError> {
        let chain_id = &session.data.chain_id;
        if session.data.is_expired_at(Utc::now()) {
            warn!(chain_id = %chain_id, address = %session.data.account_address, "[mk-02] Challenge expired");
            return Err(VerificationError::Expired {
                chain_id: chain_id.clone(),
            });
        }

        let verifier = self
            .verifiers
            .iter()
            .find(|verifier| verifier.should_verify(session))
            .ok_or_else(|| {
                debug!(chain_id = %chain_id, "[mk-02] No verifier for chain");
                VerificationError::NoMatchingVerifier {
                    chain_id: chain_id.clone(),
                }
            })?;

        if verifier.verify(session).await? {
            Ok(())
        } else {
            warn!(chain_id = %chain_id, address = %session.data.account_address, "[mk-02] Signature rejected");
            Err(VerificationError::Rejected {
                chain_id: chain_id.clone(),
            })
        }
    }
}

#[async_trait]
impl SiwxConfig for DefaultSiwx {
    async fn create_message(&self, input: &SiwxMessageInput) -> Result<SiwxMessage, SiwxError> {
        self.messenger.create_message(input).await
    }

    async fn add_session(&self, session: SiwxSession) -> Result<(), SiwxError> {
        self.verify_session(&session).await?;
        self.storage.add(&session).await?;
        info!(
            chain_id = %session.data.chain_id,
            address = %session.data.account_address,
            "[mk-02] Session added"
        );
        Ok(())
    }

    async fn revoke_session(&self, chain_id: &CaipChainId, address: &str) -> Result<(), SiwxError> {
        self.storage.delete(chain_id, address).await
    }

    async fn set_sessions(&self, sessions: Vec<SiwxSession>) -> Result<(), SiwxError> {
        for session in &sessions {
            self.verify_session(session).await?;
        }
        self.storage.set(&sessions).await
    }

    async fn get_sessions(
        &self,
        chain_id: &CaipChainId,
        address: &str,
    ) -> Result<Vec<SiwxSession>, SiwxError> {
        self.storage.get(chain_id, address).await
    }
}
