//! # SIWX Errors
//!
//! Three families, surfaced separately so callers can tell a failed
//! sign-in from a broken backend:
//!
//! | Kind | Raised by |
//! |------|-----------|
//! | Configuration | unparseable chain id on session add, nonce source unavailable |
//! | Verification | no matching verifier, verifier rejected, verifier failed, replay |
//! | Storage | sign-out reported failure, storage backend failure |

use shared_types::CaipChainId;
use thiserror::Error;

/// Coarse error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Fatal; retrying will not help.
    Configuration,
    /// Sign-in failed; the caller may retry or report.
    Verification,
    /// Operational failure of the session backend.
    Storage,
}

/// Errors from SIWX operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SiwxError {
    /// Session chain id cannot be mapped to a native chain id.
    #[error("Invalid chain ID: {0}")]
    InvalidChainId(String),

    /// The nonce capability failed while building a challenge.
    #[error("Nonce unavailable for {address}: {reason}")]
    NonceUnavailable {
        /// Account the challenge was for.
        address: String,
        /// Failure reported by the nonce source.
        reason: String,
    },

    /// Verification refused the session.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// The session backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SiwxError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidChainId(_) | Self::NonceUnavailable { .. } => ErrorKind::Configuration,
            Self::Verification(_) => ErrorKind::Verification,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Verification outcomes other than success.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// No verifier accepts the session's chain id.
    #[error("No verifier for chain {chain_id}")]
    NoMatchingVerifier {
        /// Chain id of the session.
        chain_id: CaipChainId,
    },

    /// The verifier checked the signature and refused it.
    #[error("Signature rejected for chain {chain_id}")]
    Rejected {
        /// Chain id of the session.
        chain_id: CaipChainId,
    },

    /// The challenge passed its expiration time before it was presented.
    #[error("Sign-in challenge for chain {chain_id} has expired")]
    Expired {
        /// Chain id of the session.
        chain_id: CaipChainId,
    },

    /// The verification backend failed.
    #[error("Verification backend failed: {0}")]
    Backend(String),

    /// The session's nonce was not issued, or was already spent.
    #[error(transparent)]
    Replay(#[from] NonceError),
}

/// Session storage failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The sign-out action reported failure.
    #[error("Failed to sign out")]
    SignOutFailed,

    /// The backend call itself failed.
    #[error("Session backend failed: {0}")]
    Backend(String),
}

/// Nonce issuance and consumption failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NonceError {
    /// The nonce was never issued, or has been garbage-collected.
    #[error("Nonce {nonce} was not issued")]
    UnknownNonce {
        /// Presented nonce.
        nonce: String,
    },

    /// The nonce has already been used (replay attack).
    #[error("Nonce {nonce} has already been used (replay attack)")]
    NonceReused {
        /// Presented nonce.
        nonce: String,
    },

    /// The nonce outlived its validity window.
    #[error("Nonce {nonce} expired ({age_secs}s old, limit {limit_secs}s)")]
    NonceExpired {
        /// Presented nonce.
        nonce: String,
        /// Seconds since issuance.
        age_secs: u64,
        /// Validity window in seconds.
        limit_secs: u64,
    },

    /// The nonce was issued to another account.
    #[error("Nonce {nonce} was issued to another account")]
    AddressMismatch {
        /// Presented nonce.
        nonce: String,
    },
}

/// Failure reported by an external SIWE backend or nonce source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    /// Error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SiwxError::InvalidChainId("solana:x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            SiwxError::from(VerificationError::Backend("down".into())).kind(),
            ErrorKind::Verification
        );
        assert_eq!(
            SiwxError::from(StorageError::SignOutFailed).kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_replay_is_verification_failure() {
        let err: SiwxError = VerificationError::from(NonceError::NonceReused {
            nonce: "abc123".into(),
        })
        .into();

        assert_eq!(err.kind(), ErrorKind::Verification);
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn test_error_messages_name_the_chain() {
        let err = VerificationError::NoMatchingVerifier {
            chain_id: CaipChainId::evm(1),
        };
        assert_eq!(err.to_string(), "No verifier for chain eip155:1");
        assert_eq!(StorageError::SignOutFailed.to_string(), "Failed to sign out");
    }
}
