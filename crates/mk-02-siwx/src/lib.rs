//! # MK-02 SIWX
//!
//! Sign-in-with-X session manager.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Produce a sign-in challenge bound to `(domain, uri, nonce, expiration)`,
//! verify the signed challenge with a namespace-specific verifier, and turn
//! a verified challenge into a persisted session.
//!
//! ## Failure Semantics
//!
//! | Operation | Failure | Outcome |
//! |-----------|---------|---------|
//! | `add_session` | no verifier for the chain | `VerificationError::NoMatchingVerifier` |
//! | `add_session` | signature refused | `VerificationError::Rejected` |
//! | `add_session` | challenge past its expiration | `VerificationError::Expired` |
//! | `add_session` | chain id not numeric | `SiwxError::InvalidChainId` |
//! | `revoke_session` | sign-out refused | `StorageError::SignOutFailed` |
//! | `get_sessions` | backend read failed | empty list (logged) |
//!
//! ## Module Structure
//!
//! ```text
//! mk-02-siwx/
//! ├── domain/          # SiwxMessage, SiwxSession, errors
//! ├── ports/           # SiwxConfig (inbound) + SiweClient, verifiers, storage (outbound)
//! ├── adapters/        # InformalMessenger, nonce sources, verifiers, SiweStorage
//! ├── service.rs       # DefaultSiwx
//! ├── mapping.rs       # map_to_siwx
//! └── config.rs        # MessengerConfig, NonceIssuerConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod mapping;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    ClientNonceProvider, InMemoryNonceIssuer, InformalMessenger, InformalMessengerParams,
    NamespaceVerifier, ReplayGuard, SiweStorage, SiweVerificationBackend,
};
pub use config::{MessengerConfig, NonceIssuerConfig};
pub use domain::{
    BackendError, ErrorKind, NonceError, SiwxError, SiwxMessage, SiwxMessageData,
    SiwxMessageInput, SiwxSession, StorageError, VerificationError,
};
pub use mapping::{map_to_siwx, map_to_siwx_guarded, map_to_siwx_with};
pub use ports::{
    MockSiweClient, NonceProvider, SignInData, SiweClient, SiweMessageParams, SiweSession,
    SiwxConfig, SiwxMessenger, SiwxStorage, SiwxVerifier, VerificationBackend,
};
pub use service::DefaultSiwx;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
