//! # Mock Signatures
//!
//! Deterministic signature stand-in shared by the mock wallet and the mock
//! SIWE backend, so a mock-signed challenge verifies against the mock
//! verifier.

use sha2::{Digest, Sha256};

/// Deterministic stand-in for a wallet signature over `message`.
///
/// `0x`-prefixed hex of `sha256(signer || "\n" || message)`.
#[must_use]
pub fn mock_signature(signer: &str, message: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(signer.as_bytes());
    hasher.update(b"\n");
    hasher.update(message.as_bytes());
    format!("0x{}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_binds_signer_and_message() {
        let signature = mock_signature("0xABC", "hello");

        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 66);
        assert_eq!(signature, mock_signature("0xABC", "hello"));
        assert_ne!(signature, mock_signature("0xABD", "hello"));
        assert_ne!(signature, mock_signature("0xABC", "hello "));
    }
}
