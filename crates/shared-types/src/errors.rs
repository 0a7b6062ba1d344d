//! # Error Types
//!
//! Validation errors raised while constructing shared identifiers.

use thiserror::Error;

/// Errors that can occur when parsing or validating chain identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Namespace does not follow the CAIP-2 namespace grammar.
    #[error("Invalid chain namespace: {0:?} (expected 3-8 chars of [-a-z0-9])")]
    InvalidNamespace(String),

    /// Chain reference does not follow the CAIP-2 reference grammar.
    #[error("Invalid chain reference: {0:?} (expected 1-32 chars of [-_a-zA-Z0-9])")]
    InvalidReference(String),

    /// Identifier has no `namespace:` prefix.
    #[error("Missing namespace prefix in {0:?}")]
    MissingNamespacePrefix(String),

    /// Account address part of a CAIP-10 identifier is empty or malformed.
    #[error("Invalid account address in {0:?}")]
    InvalidAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_namespace_error() {
        let err = TypeError::InvalidNamespace("EIP155".to_string());
        assert!(err.to_string().contains("EIP155"));
    }

    #[test]
    fn test_missing_prefix_error() {
        let err = TypeError::MissingNamespacePrefix("1".to_string());
        assert!(err.to_string().contains("Missing namespace prefix"));
    }
}
