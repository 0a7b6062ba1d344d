//! # CAIP Identifiers
//!
//! Namespace-qualified chain ids (`eip155:1`) and account ids
//! (`eip155:1:0xabc...`).

use crate::errors::TypeError;
use crate::namespace::ChainNamespace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum chain reference length (CAIP-2).
pub const REFERENCE_MAX_LEN: usize = 32;

/// Chain id as understood natively by the chain's own tooling.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NativeChainId {
    /// Numeric chain id (EVM chains).
    Numeric(u64),
    /// Opaque reference (genesis hashes, cluster ids).
    Reference(String),
}

impl fmt::Display for NativeChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Reference(reference) => f.write_str(reference),
        }
    }
}

/// CAIP-2 chain id: `namespace:reference`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaipChainId {
    namespace: ChainNamespace,
    reference: String,
}

impl CaipChainId {
    /// Build from parts, validating the reference.
    pub fn new(namespace: ChainNamespace, reference: impl Into<String>) -> Result<Self, TypeError> {
        let reference = reference.into();
        validate_reference(&reference)?;
        Ok(Self {
            namespace,
            reference,
        })
    }

    /// EVM chain id, e.g. `eip155:1`.
    pub fn evm(chain_id: u64) -> Self {
        Self {
            namespace: ChainNamespace::EIP155,
            reference: chain_id.to_string(),
        }
    }

    /// Parse `namespace:reference`.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        let (namespace, reference) = value
            .split_once(':')
            .ok_or_else(|| TypeError::MissingNamespacePrefix(value.to_string()))?;
        Self::new(ChainNamespace::new(namespace)?, reference)
    }

    /// Namespace prefix.
    pub fn namespace(&self) -> &ChainNamespace {
        &self.namespace
    }

    /// Chain-specific reference.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Native chain id: numeric when the reference is a decimal integer.
    pub fn native_chain_id(&self) -> NativeChainId {
        match self.reference.parse::<u64>() {
            Ok(id) => NativeChainId::Numeric(id),
            Err(_) => NativeChainId::Reference(self.reference.clone()),
        }
    }
}

fn validate_reference(value: &str) -> Result<(), TypeError> {
    let len_ok = (1..=REFERENCE_MAX_LEN).contains(&value.len());
    let chars_ok = value
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    if !len_ok || !chars_ok {
        return Err(TypeError::InvalidReference(value.to_string()));
    }
    Ok(())
}

impl fmt::Display for CaipChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.reference)
    }
}

impl FromStr for CaipChainId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CaipChainId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CaipChainId> for String {
    fn from(value: CaipChainId) -> Self {
        value.to_string()
    }
}

/// Parse the numeric chain id out of an `eip155:<id>` string.
///
/// Returns `None` for other namespaces and for non-numeric references.
pub fn parse_evm_chain_id(value: &str) -> Option<u64> {
    let id = CaipChainId::parse(value).ok()?;
    if !id.namespace().is_evm() {
        return None;
    }
    id.reference().parse().ok()
}

/// CAIP-10 account id: `namespace:reference:address`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaipAddress {
    chain_id: CaipChainId,
    address: String,
}

impl CaipAddress {
    /// Build from a chain id and a plain address.
    pub fn new(chain_id: CaipChainId, address: impl Into<String>) -> Result<Self, TypeError> {
        let address = address.into();
        if address.is_empty() || address.contains(':') {
            return Err(TypeError::InvalidAddress(address));
        }
        Ok(Self { chain_id, address })
    }

    /// Parse `namespace:reference:address`.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        let (chain, address) = value
            .rsplit_once(':')
            .ok_or_else(|| TypeError::InvalidAddress(value.to_string()))?;
        Self::new(CaipChainId::parse(chain)?, address)
    }

    /// Chain part.
    pub fn chain_id(&self) -> &CaipChainId {
        &self.chain_id
    }

    /// Plain address part.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for CaipAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.address)
    }
}

impl FromStr for CaipAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CaipAddress {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CaipAddress> for String {
    fn from(value: CaipAddress) -> Self {
        value.to_string()
    }
}
