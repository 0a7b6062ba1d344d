//! # SIWX Configuration

use serde::{Deserialize, Serialize};

/// Challenge defaults used when wiring a SIWE backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessengerConfig {
    /// Domain used when the backend supplies none.
    pub fallback_domain: String,

    /// URI used when the backend supplies none.
    pub fallback_uri: String,

    /// Message format version.
    pub version: String,

    /// Statement used when the backend supplies none.
    pub default_statement: Option<String>,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            fallback_domain: "Unknown Domain".to_string(),
            fallback_uri: "Unknown URI".to_string(),
            version: "1".to_string(),
            default_statement: None,
        }
    }
}

impl MessengerConfig {
    /// Create a config for testing.
    pub fn for_testing() -> Self {
        Self {
            default_statement: Some("Sign in for testing".to_string()),
            ..Self::default()
        }
    }
}

/// Nonce issuer limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceIssuerConfig {
    /// Seconds an issued nonce stays redeemable.
    pub validity_window_secs: u64,

    /// Minimum seconds between garbage-collection sweeps.
    pub gc_interval_secs: u64,
}

impl Default for NonceIssuerConfig {
    fn default() -> Self {
        Self {
            validity_window_secs: 300,
            gc_interval_secs: 30,
        }
    }
}

impl NonceIssuerConfig {
    /// Create a config for testing (short window, sweep on every call).
    pub fn for_testing() -> Self {
        Self {
            validity_window_secs: 60,
            gc_interval_secs: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_messenger_config() {
        let config = MessengerConfig::default();
        assert_eq!(config.fallback_domain, "Unknown Domain");
        assert_eq!(config.fallback_uri, "Unknown URI");
        assert_eq!(config.version, "1");
    }

    #[test]
    fn test_default_nonce_issuer_config() {
        let config = NonceIssuerConfig::default();
        assert!(config.validity_window_secs > config.gc_interval_secs);
    }

    #[test]
    fn test_messenger_config_round_trips_through_json() {
        let config = MessengerConfig::for_testing();
        let json = serde_json::to_string(&config).unwrap();
        let back: MessengerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
