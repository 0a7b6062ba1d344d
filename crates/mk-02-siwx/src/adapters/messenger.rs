//! # Informal Messenger
//!
//! Builds human-readable challenges. The nonce is fetched from the nonce
//! capability on every call and never cached.

use crate::domain::{SiwxError, SiwxMessage, SiwxMessageData, SiwxMessageInput};
use crate::ports::{NonceProvider, SiwxMessenger};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Challenge parameters, fixed at construction.
#[derive(Clone)]
pub struct InformalMessengerParams {
    /// Domain requesting the sign-in.
    pub domain: String,
    /// URI of the resource being signed in to.
    pub uri: String,
    /// Challenge lifetime in seconds.
    pub expiration: Option<u64>,
    /// Optional human-readable statement.
    pub statement: Option<String>,
    /// Message format version.
    pub version: String,
    /// Source of a fresh nonce per challenge.
    pub nonce_provider: Arc<dyn NonceProvider>,
}

impl InformalMessengerParams {
    /// Parameters with no expiration, no statement and version `1`.
    pub fn new(
        domain: impl Into<String>,
        uri: impl Into<String>,
        nonce_provider: Arc<dyn NonceProvider>,
    ) -> Self {
        Self {
            domain: domain.into(),
            uri: uri.into(),
            expiration: None,
            statement: None,
            version: "1".to_string(),
            nonce_provider,
        }
    }

    /// Challenge lifetime in seconds; `None` never expires.
    pub fn with_expiration(mut self, seconds: Option<u64>) -> Self {
        self.expiration = seconds;
        self
    }

    /// Statement shown above the challenge fields.
    pub fn with_statement(mut self, statement: Option<String>) -> Self {
        self.statement = statement;
        self
    }

    /// Override the message format version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl fmt::Debug for InformalMessengerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InformalMessengerParams")
            .field("domain", &self.domain)
            .field("uri", &self.uri)
            .field("expiration", &self.expiration)
            .field("statement", &self.statement)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// [`SiwxMessenger`] producing the informal text format.
#[derive(Debug)]
pub struct InformalMessenger {
    params: InformalMessengerParams,
}

impl InformalMessenger {
    /// Messenger rendering challenges from `params`.
    pub fn new(params: InformalMessengerParams) -> Self {
        Self { params }
    }

    /// Parameters in use.
    pub fn params(&self) -> &InformalMessengerParams {
        &self.params
    }
}

#[async_trait]
impl SiwxMessenger for InformalMessenger {
    async fn create_message(&self, input: &SiwxMessageInput) -> Result<SiwxMessage, SiwxError> {
        let nonce = self
            .params
            .nonce_provider
            .get_nonce(&input.account_address)
            .await
            .map_err(|e| SiwxError::NonceUnavailable {
                address: input.account_address.clone(),
                reason: e.to_string(),
            })?;

        let issued_at = Utc::now();
        let expiration_time = self.params.expiration.and_then(|seconds| {
            let seconds = i64::try_from(seconds).ok()?;
            issued_at.checked_add_signed(Duration::try_seconds(seconds)?)
        });

        debug!(
            chain_id = %input.chain_id,
            address = %input.account_address,
            "[mk-02] Challenge created"
        );

        Ok(SiwxMessage::new(SiwxMessageData {
            account_address: input.account_address.clone(),
            chain_id: input.chain_id.clone(),
            domain: self.params.domain.clone(),
            uri: self.params.uri.clone(),
            version: self.params.version.clone(),
            nonce,
            issued_at: Some(issued_at),
            expiration_time,
            statement: self.params.statement.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BackendError;
    use parking_lot::Mutex;
    use shared_types::CaipChainId;

    /// Hands out `nonce-1`, `nonce-2`, ...
    #[derive(Default)]
    struct CountingNonces {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NonceProvider for CountingNonces {
        async fn get_nonce(&self, account_address: &str) -> Result<String, BackendError> {
            let mut calls = self.calls.lock();
            calls.push(account_address.to_string());
            Ok(format!("nonce-{}", calls.len()))
        }
    }

    struct NoNonces;

    #[async_trait]
    impl NonceProvider for NoNonces {
        async fn get_nonce(&self, _account_address: &str) -> Result<String, BackendError> {
            Err(BackendError::new("offline"))
        }
    }

    fn input(address: &str) -> SiwxMessageInput {
        SiwxMessageInput::new(address, CaipChainId::evm(1))
    }

    #[tokio::test]
    async fn test_nonce_fetched_per_attempt() {
        let nonces = Arc::new(CountingNonces::default());
        let messenger = InformalMessenger::new(InformalMessengerParams::new(
            "example.com",
            "https://example.com",
            nonces.clone(),
        ));

        let first = messenger.create_message(&input("0xABC")).await.unwrap();
        let second = messenger.create_message(&input("0xABC")).await.unwrap();
        let other = messenger.create_message(&input("0xDEF")).await.unwrap();

        assert_eq!(first.data.nonce, "nonce-1");
        assert_eq!(second.data.nonce, "nonce-2");
        assert_eq!(other.data.nonce, "nonce-3");
        assert_eq!(*nonces.calls.lock(), vec!["0xABC", "0xABC", "0xDEF"]);
    }

    #[tokio::test]
    async fn test_message_carries_params() {
        let messenger = InformalMessenger::new(
            InformalMessengerParams::new("example.com", "https://example.com", Arc::new(CountingNonces::default()))
                .with_expiration(Some(600))
                .with_statement(Some("Welcome".to_string())),
        );

        let message = messenger.create_message(&input("0xABC")).await.unwrap();
        let data = &message.data;
        assert_eq!(data.domain, "example.com");
        assert_eq!(data.version, "1");
        assert_eq!(data.statement.as_deref(), Some("Welcome"));

        let issued_at = data.issued_at.unwrap();
        assert_eq!(data.expiration_time, Some(issued_at + Duration::seconds(600)));
        assert!(message.to_string().starts_with("example.com wants you to sign in"));
    }

    #[tokio::test]
    async fn test_no_expiration_without_expiry() {
        let messenger = InformalMessenger::new(InformalMessengerParams::new(
            "example.com",
            "https://example.com",
            Arc::new(CountingNonces::default()),
        ));

        let message = messenger.create_message(&input("0xABC")).await.unwrap();
        assert!(message.data.expiration_time.is_none());
    }

    #[tokio::test]
    async fn test_nonce_failure_is_configuration_error() {
        let messenger = InformalMessenger::new(InformalMessengerParams::new(
            "example.com",
            "https://example.com",
            Arc::new(NoNonces),
        ));

        let err = messenger.create_message(&input("0xABC")).await.unwrap_err();
        assert_eq!(err.kind(), crate::domain::ErrorKind::Configuration);
    }
}
