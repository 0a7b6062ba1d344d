//! # Nonce Sources
//!
//! - [`ClientNonceProvider`] asks the application's SIWE backend.
//! - [`InMemoryNonceIssuer`] issues UUID nonces itself and remembers them
//!   for a bounded window, so a signed challenge can be redeemed once.
//!
//! ## Issuer Lifecycle
//!
//! ```text
//! issue(address) ──► issued ──consume(address, nonce)──► spent
//!                      │                                   │
//!                      └── dropped after validity window ──┘
//! ```

use crate::config::NonceIssuerConfig;
use crate::domain::{BackendError, NonceError};
use crate::ports::{NonceProvider, SiweClient};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// [`NonceProvider`] delegating to [`SiweClient::get_nonce`].
pub struct ClientNonceProvider {
    client: Arc<dyn SiweClient>,
}

impl ClientNonceProvider {
    /// Provider asking `client` for every nonce.
    pub fn new(client: Arc<dyn SiweClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NonceProvider for ClientNonceProvider {
    async fn get_nonce(&self, account_address: &str) -> Result<String, BackendError> {
        self.client.get_nonce(account_address).await
    }
}

struct IssuedNonce {
    address: String,
    issued_at: u64,
}

#[derive(Default)]
struct NonceLedger {
    /// Outstanding nonces.
    issued: HashMap<Uuid, IssuedNonce>,
    /// Redeemed nonces -> redemption time.
    spent: HashMap<Uuid, u64>,
    last_gc: u64,
}

/// Time-bounded nonce issuer.
///
/// A nonce is redeemable once, by the address it was issued to, within
/// `validity_window_secs` of issuance.
pub struct InMemoryNonceIssuer {
    config: NonceIssuerConfig,
    ledger: Mutex<NonceLedger>,
}

impl InMemoryNonceIssuer {
    /// Issuer with an empty ledger.
    #[must_use]
    pub fn new(config: NonceIssuerConfig) -> Self {
        Self {
            config,
            ledger: Mutex::new(NonceLedger::default()),
        }
    }

    /// Issue a fresh nonce for `address`.
    pub fn issue(&self, address: &str) -> String {
        self.issue_at(address, Self::current_timestamp())
    }

    /// Redeem `nonce` for `address`.
    ///
    /// # Errors
    ///
    /// - `NonceError::NonceReused` - already redeemed
    /// - `NonceError::UnknownNonce` - never issued, or dropped after expiry
    /// - `NonceError::AddressMismatch` - issued to another address
    /// - `NonceError::NonceExpired` - older than the validity window
    ///
    /// A failed redemption still burns an outstanding nonce.
    pub fn consume(&self, address: &str, nonce: &str) -> Result<(), NonceError> {
        self.consume_at(address, nonce, Self::current_timestamp())
    }

    /// Number of outstanding nonces.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.ledger.lock().issued.len()
    }

    fn issue_at(&self, address: &str, now: u64) -> String {
        let nonce = Uuid::new_v4();
        let mut ledger = self.ledger.lock();
        self.maybe_collect(&mut ledger, now);
        ledger.issued.insert(
            nonce,
            IssuedNonce {
                address: address.to_string(),
                issued_at: now,
            },
        );
        nonce.simple().to_string()
    }

    fn consume_at(&self, address: &str, nonce: &str, now: u64) -> Result<(), NonceError> {
        let Ok(id) = Uuid::parse_str(nonce) else {
            return Err(NonceError::UnknownNonce {
                nonce: nonce.to_string(),
            });
        };

        let mut ledger = self.ledger.lock();
        self.maybe_collect(&mut ledger, now);

        if ledger.spent.contains_key(&id) {
            return Err(NonceError::NonceReused {
                nonce: nonce.to_string(),
            });
        }

        let issued = ledger.issued.remove(&id).ok_or_else(|| NonceError::UnknownNonce {
            nonce: nonce.to_string(),
        })?;
        ledger.spent.insert(id, now);

        if issued.address != address {
            return Err(NonceError::AddressMismatch {
                nonce: nonce.to_string(),
            });
        }

        let age_secs = now.saturating_sub(issued.issued_at);
        if age_secs > self.config.validity_window_secs {
            return Err(NonceError::NonceExpired {
                nonce: nonce.to_string(),
                age_secs,
                limit_secs: self.config.validity_window_secs,
            });
        }

        Ok(())
    }

    fn maybe_collect(&self, ledger: &mut NonceLedger, now: u64) {
        if now.saturating_sub(ledger.last_gc) < self.config.gc_interval_secs {
            return;
        }
        let window = self.config.validity_window_secs;
        let before = ledger.issued.len() + ledger.spent.len();
        ledger
            .issued
            .retain(|_, issued| now.saturating_sub(issued.issued_at) <= window);
        ledger
            .spent
            .retain(|_, &mut spent_at| now.saturating_sub(spent_at) <= window);
        ledger.last_gc = now;

        let dropped = before - (ledger.issued.len() + ledger.spent.len());
        if dropped > 0 {
            debug!(dropped, "[mk-02] Expired nonces collected");
        }
    }

    fn current_timestamp() -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

impl Default for InMemoryNonceIssuer {
    fn default() -> Self {
        Self::new(NonceIssuerConfig::default())
    }
}

#[async_trait]
impl NonceProvider for InMemoryNonceIssuer {
    async fn get_nonce(&self, account_address: &str) -> Result<String, BackendError> {
        Ok(self.issue(account_address))
    }
}
