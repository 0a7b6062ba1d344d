//! # Adapters
//!
//! Concrete messengers, nonce sources, verifiers and storage.

pub mod messenger;
pub mod nonce;
pub mod storage;
pub mod verifiers;

pub use messenger::{InformalMessenger, InformalMessengerParams};
pub use nonce::{ClientNonceProvider, InMemoryNonceIssuer};
pub use storage::SiweStorage;
pub use verifiers::{NamespaceVerifier, ReplayGuard, SiweVerificationBackend};
