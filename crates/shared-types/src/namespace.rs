//! # Chain Namespaces
//!
//! A namespace identifies a blockchain ecosystem family (`eip155`, `solana`, ...)
//! and is the partition key for adapters and per-namespace state.
//!
//! The supported set is open-ended, so namespaces are validated opaque strings
//! rather than a closed enum. Well-known namespaces are exposed as constants.

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Minimum namespace length (CAIP-2).
pub const NAMESPACE_MIN_LEN: usize = 3;

/// Maximum namespace length (CAIP-2).
pub const NAMESPACE_MAX_LEN: usize = 8;

/// Validated CAIP-2 namespace tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainNamespace(Cow<'static, str>);

impl ChainNamespace {
    /// EVM-compatible chains. Also the default namespace.
    pub const EIP155: Self = Self(Cow::Borrowed("eip155"));
    /// Solana clusters.
    pub const SOLANA: Self = Self(Cow::Borrowed("solana"));
    /// Polkadot parachains.
    pub const POLKADOT: Self = Self(Cow::Borrowed("polkadot"));
    /// Bitcoin-family chains.
    pub const BIP122: Self = Self(Cow::Borrowed("bip122"));

    /// Validate and wrap a namespace string.
    pub fn new(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        validate_namespace(&value)?;
        Ok(Self(Cow::Owned(value)))
    }

    /// The namespace tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the EVM family.
    pub fn is_evm(&self) -> bool {
        *self == Self::EIP155
    }

    /// Human readable ecosystem name, used in sign-in messages.
    pub fn display_name(&self) -> &str {
        match self.as_str() {
            "eip155" => "Ethereum",
            "solana" => "Solana",
            "polkadot" => "Polkadot",
            "bip122" => "Bitcoin",
            other => other,
        }
    }
}

impl Default for ChainNamespace {
    fn default() -> Self {
        Self::EIP155
    }
}

fn validate_namespace(value: &str) -> Result<(), TypeError> {
    let len_ok = (NAMESPACE_MIN_LEN..=NAMESPACE_MAX_LEN).contains(&value.len());
    let chars_ok = value
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');

    if !len_ok || !chars_ok {
        return Err(TypeError::InvalidNamespace(value.to_string()));
    }
    Ok(())
}

impl fmt::Display for ChainNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ChainNamespace {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for ChainNamespace {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChainNamespace {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChainNamespace> for String {
    fn from(value: ChainNamespace) -> Self {
        value.0.into_owned()
    }
}
