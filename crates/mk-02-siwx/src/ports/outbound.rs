//! # Outbound Ports
//!
//! Capabilities the session manager is built from: the application's SIWE
//! backend, nonce sources, verifiers, messengers and session storage.

use crate::domain::{
    BackendError, SiwxError, SiwxMessage, SiwxMessageInput, SiwxSession, VerificationError,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{mock_signature, CaipChainId, ChainNamespace};

/// Challenge parameters supplied by the application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiweMessageParams {
    /// Requesting domain.
    pub domain: Option<String>,
    /// Requesting URI.
    pub uri: Option<String>,
    /// Challenge lifetime in seconds.
    pub expiry: Option<u64>,
    /// Statement shown to the user.
    pub statement: Option<String>,
}

/// Current session as known to the SIWE backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiweSession {
    /// Signed-in account.
    pub address: String,
    /// EVM chain id.
    pub chain_id: u64,
}

/// Payload of the sign-in callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInData {
    /// Signed-in account.
    pub address: String,
    /// EVM chain id.
    pub chain_id: u64,
}

/// Application SIWE backend - outbound port.
#[async_trait]
pub trait SiweClient: Send + Sync {
    /// Challenge parameters, when the application provides them.
    async fn get_message_params(&self) -> Result<Option<SiweMessageParams>, BackendError> {
        Ok(None)
    }

    /// Fresh nonce for `address`.
    async fn get_nonce(&self, address: &str) -> Result<String, BackendError>;

    /// Check `signature` over `message`.
    async fn verify_message(&self, message: &str, signature: &str) -> Result<bool, BackendError>;

    /// Current session, if any.
    async fn get_session(&self) -> Result<Option<SiweSession>, BackendError>;

    /// End the current session. `Ok(false)` means the backend refused.
    async fn sign_out(&self) -> Result<bool, BackendError>;

    /// Called after a session was stored.
    fn on_sign_in(&self, _data: &SignInData) {}

    /// Called after a successful sign-out.
    fn on_sign_out(&self) {}
}

/// Per-address nonce capability - outbound port.
///
/// Called once per challenge; implementations must not reuse nonces
/// across attempts or addresses.
#[async_trait]
pub trait NonceProvider: Send + Sync {
    /// Fresh nonce for `account_address`.
    async fn get_nonce(&self, account_address: &str) -> Result<String, BackendError>;
}

/// Builds sign-in challenges - outbound port.
#[async_trait]
pub trait SiwxMessenger: Send + Sync {
    /// Challenge for `input`, with a fresh nonce.
    async fn create_message(&self, input: &SiwxMessageInput) -> Result<SiwxMessage, SiwxError>;
}

/// Namespace-specific signature verifier - outbound port.
#[async_trait]
pub trait SiwxVerifier: Send + Sync {
    /// Namespace this verifier serves.
    fn chain_namespace(&self) -> &ChainNamespace;

    /// Whether this verifier handles `session`.
    fn should_verify(&self, session: &SiwxSession) -> bool;

    /// Verify the session's signature over its message.
    async fn verify(&self, session: &SiwxSession) -> Result<bool, VerificationError>;
}

/// Signature check behind a [`SiwxVerifier`] - outbound port.
#[async_trait]
pub trait VerificationBackend: Send + Sync {
    /// Whether the signature is valid for the message.
    async fn verify(&self, session: &SiwxSession) -> Result<bool, BackendError>;
}

/// Session persistence - outbound port.
#[async_trait]
pub trait SiwxStorage: Send + Sync {
    /// Persist a verified session.
    async fn add(&self, session: &SiwxSession) -> Result<(), SiwxError>;

    /// Replace the stored sessions.
    async fn set(&self, sessions: &[SiwxSession]) -> Result<(), SiwxError>;

    /// Sessions for `(chain_id, address)`.
    async fn get(&self, chain_id: &CaipChainId, address: &str)
        -> Result<Vec<SiwxSession>, SiwxError>;

    /// Remove the session for `(chain_id, address)`.
    async fn delete(&self, chain_id: &CaipChainId, address: &str) -> Result<(), SiwxError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock SIWE backend for testing.
///
/// Accepts signatures produced by [`mock_signature`] for its signer and
/// keeps one current session, set by `on_sign_in`.
pub struct MockSiweClient {
    signer: String,
    params: Option<SiweMessageParams>,
    nonce: String,
    sign_out_succeeds: bool,
    fail_session_read: bool,
    session: Mutex<Option<SiweSession>>,
    nonce_requests: Mutex<Vec<String>>,
    sign_ins: Mutex<Vec<SignInData>>,
    sign_outs: Mutex<u32>,
}

impl MockSiweClient {
    /// Mock accepting signatures of `signer`.
    #[must_use]
    pub fn new(signer: impl Into<String>) -> Self {
        Self {
            signer: signer.into(),
            params: None,
            nonce: "mock-nonce".to_string(),
            sign_out_succeeds: true,
            fail_session_read: false,
            session: Mutex::new(None),
            nonce_requests: Mutex::new(Vec::new()),
            sign_ins: Mutex::new(Vec::new()),
            sign_outs: Mutex::new(0),
        }
    }

    /// Challenge parameters returned by `get_message_params`.
    #[must_use]
    pub fn with_params(mut self, params: SiweMessageParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Nonce returned by every `get_nonce` call.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }

    /// Start with `session` signed in.
    #[must_use]
    pub fn with_session(self, session: SiweSession) -> Self {
        *self.session.lock() = Some(session);
        self
    }

    /// Sign-out reports failure.
    #[must_use]
    pub fn refusing_sign_out(mut self) -> Self {
        self.sign_out_succeeds = false;
        self
    }

    /// Session reads fail.
    #[must_use]
    pub fn failing_session_read(mut self) -> Self {
        self.fail_session_read = true;
        self
    }

    /// Addresses nonces were requested for, oldest first.
    pub fn nonce_requests(&self) -> Vec<String> {
        self.nonce_requests.lock().clone()
    }

    /// Sign-in callbacks received, oldest first.
    pub fn sign_ins(&self) -> Vec<SignInData> {
        self.sign_ins.lock().clone()
    }

    /// Number of sign-out callbacks.
    pub fn sign_outs(&self) -> u32 {
        *self.sign_outs.lock()
    }
}

#[async_trait]
impl SiweClient for MockSiweClient {
    async fn get_message_params(&self) -> Result<Option<SiweMessageParams>, BackendError> {
        Ok(self.params.clone())
    }

    async fn get_nonce(&self, address: &str) -> Result<String, BackendError> {
        self.nonce_requests.lock().push(address.to_string());
        Ok(self.nonce.clone())
    }

    async fn verify_message(&self, message: &str, signature: &str) -> Result<bool, BackendError> {
        Ok(signature == mock_signature(&self.signer, message))
    }

    async fn get_session(&self) -> Result<Option<SiweSession>, BackendError> {
        if self.fail_session_read {
            return Err(BackendError::new("Mock session read failure"));
        }
        Ok(self.session.lock().clone())
    }

    async fn sign_out(&self) -> Result<bool, BackendError> {
        if self.sign_out_succeeds {
            *self.session.lock() = None;
        }
        Ok(self.sign_out_succeeds)
    }

    fn on_sign_in(&self, data: &SignInData) {
        *self.session.lock() = Some(SiweSession {
            address: data.address.clone(),
            chain_id: data.chain_id,
        });
        self.sign_ins.lock().push(data.clone());
    }

    fn on_sign_out(&self) {
        *self.sign_outs.lock() += 1;
    }
}
