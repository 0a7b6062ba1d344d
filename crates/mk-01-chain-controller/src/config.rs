//! # Chain Controller Configuration

use serde::{Deserialize, Serialize};
use shared_types::ChainNamespace;

/// Chain controller configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainControllerConfig {
    /// Initial multi-chain flag. When off, `set_account_prop` always targets
    /// the active namespace.
    pub multi_chain_enabled: bool,

    /// Initial universal-adapter-only flag.
    pub universal_adapter_only: bool,

    /// Namespace activated by `initialize_universal_adapter`.
    pub default_namespace: ChainNamespace,

    /// Placeholder namespaces registered by `initialize_universal_adapter`.
    pub universal_namespaces: Vec<ChainNamespace>,
}

impl Default for ChainControllerConfig {
    fn default() -> Self {
        Self {
            multi_chain_enabled: false,
            universal_adapter_only: false,
            default_namespace: ChainNamespace::EIP155,
            universal_namespaces: vec![ChainNamespace::EIP155, ChainNamespace::SOLANA],
        }
    }
}

impl ChainControllerConfig {
    /// Create a config for testing (multi-chain on).
    pub fn for_testing() -> Self {
        Self {
            multi_chain_enabled: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChainControllerConfig::default();
        assert!(!config.multi_chain_enabled);
        assert_eq!(config.default_namespace, ChainNamespace::EIP155);
        assert_eq!(config.universal_namespaces.len(), 2);
    }

    #[test]
    fn test_testing_config() {
        assert!(ChainControllerConfig::for_testing().multi_chain_enabled);
    }

    #[test]
    fn test_config_deserializes() {
        let config: ChainControllerConfig = serde_json::from_str(
            r#"{
                "multi_chain_enabled": true,
                "universal_adapter_only": false,
                "default_namespace": "solana",
                "universal_namespaces": ["solana"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.default_namespace, ChainNamespace::SOLANA);
    }

    #[test]
    fn test_config_rejects_invalid_namespace() {
        let result: Result<ChainControllerConfig, _> = serde_json::from_str(
            r#"{
                "multi_chain_enabled": true,
                "universal_adapter_only": false,
                "default_namespace": "NOT VALID",
                "universal_namespaces": []
            }"#,
        );
        assert!(result.is_err());
    }
}
