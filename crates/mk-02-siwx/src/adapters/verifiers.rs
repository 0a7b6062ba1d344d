//! # Verifiers
//!
//! [`NamespaceVerifier`] matches sessions by chain namespace and hands the
//! signature check to a [`VerificationBackend`]. [`ReplayGuard`] wraps any
//! verifier and redeems the session nonce first.

use crate::adapters::nonce::InMemoryNonceIssuer;
use crate::domain::{BackendError, SiwxSession, VerificationError};
use crate::ports::{SiweClient, SiwxVerifier, VerificationBackend};
use async_trait::async_trait;
use shared_types::ChainNamespace;
use std::sync::Arc;
use tracing::{debug, warn};

/// Verifier for every session whose chain id is in `namespace`.
pub struct NamespaceVerifier<B> {
    namespace: ChainNamespace,
    backend: B,
}

impl<B: VerificationBackend> NamespaceVerifier<B> {
    /// Verifier for `namespace` backed by `backend`.
    pub fn new(namespace: ChainNamespace, backend: B) -> Self {
        Self { namespace, backend }
    }

    /// Signature backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: VerificationBackend> SiwxVerifier for NamespaceVerifier<B> {
    fn chain_namespace(&self) -> &ChainNamespace {
        &self.namespace
    }

    fn should_verify(&self, session: &SiwxSession) -> bool {
        session.namespace() == &self.namespace
    }

    async fn verify(&self, session: &SiwxSession) -> Result<bool, VerificationError> {
        self.backend.verify(session).await.map_err(|e| {
            warn!(chain_id = %session.data.chain_id, error = %e, "[mk-02] Verification backend failed");
            VerificationError::Backend(e.to_string())
        })
    }
}

/// Backend checking the rendered message through
/// [`SiweClient::verify_message`].
pub struct SiweVerificationBackend {
    client: Arc<dyn SiweClient>,
}

impl SiweVerificationBackend {
    /// Backend calling `client`.
    pub fn new(client: Arc<dyn SiweClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VerificationBackend for SiweVerificationBackend {
    async fn verify(&self, session: &SiwxSession) -> Result<bool, BackendError> {
        self.client
            .verify_message(&session.message, &session.signature)
            .await
    }
}

/// Verifier redeeming the session nonce against an issuer before
/// delegating. A nonce is accepted once.
pub struct ReplayGuard<V> {
    inner: V,
    issuer: Arc<InMemoryNonceIssuer>,
}

impl<V: SiwxVerifier> ReplayGuard<V> {
    /// Guard redeeming nonces against `issuer` before `inner` runs.
    pub fn new(inner: V, issuer: Arc<InMemoryNonceIssuer>) -> Self {
        Self { inner, issuer }
    }
}

#[async_trait]
impl<V: SiwxVerifier> SiwxVerifier for ReplayGuard<V> {
    fn chain_namespace(&self) -> &ChainNamespace {
        self.inner.chain_namespace()
    }

    fn should_verify(&self, session: &SiwxSession) -> bool {
        self.inner.should_verify(session)
    }

    async fn verify(&self, session: &SiwxSession) -> Result<bool, VerificationError> {
        self.issuer
            .consume(&session.data.account_address, &session.data.nonce)?;
        debug!(nonce = %session.data.nonce, "[mk-02] Nonce redeemed");
        self.inner.verify(session).await
    }
}
