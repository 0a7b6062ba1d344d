//! # Inbound Ports
//!
//! API trait defining what the SIWX session manager can do.

use crate::domain::{SiwxError, SiwxMessage, SiwxMessageInput, SiwxSession};
use async_trait::async_trait;
use shared_types::CaipChainId;

/// SIWX configuration API - inbound port.
#[async_trait]
pub trait SiwxConfig: Send + Sync {
    /// Build a fresh challenge for the account.
    async fn create_message(&self, input: &SiwxMessageInput) -> Result<SiwxMessage, SiwxError>;

    /// Verify `session`, then persist it.
    ///
    /// # Errors
    /// * `VerificationError::NoMatchingVerifier` - no verifier accepts the chain id
    /// * `VerificationError::Rejected` - the signature was refused
    /// * `VerificationError::Backend` - the verifier failed
    /// * `SiwxError::InvalidChainId` - storage cannot map the chain id
    async fn add_session(&self, session: SiwxSession) -> Result<(), SiwxError>;

    /// Remove the session for `(chain_id, address)`.
    async fn revoke_session(&self, chain_id: &CaipChainId, address: &str) -> Result<(), SiwxError>;

    /// Verify every session, then replace the stored set.
    async fn set_sessions(&self, sessions: Vec<SiwxSession>) -> Result<(), SiwxError>;

    /// Stored sessions for `(chain_id, address)`.
    async fn get_sessions(
        &self,
        chain_id: &CaipChainId,
        address: &str,
    ) -> Result<Vec<SiwxSession>, SiwxError>;
}
