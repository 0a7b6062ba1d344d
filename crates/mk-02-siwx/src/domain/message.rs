//! # Sign-In Messages
//!
//! Challenge data and its human-readable rendering.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use shared_types::CaipChainId;
use std::fmt;

/// Account a challenge is built for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiwxMessageInput {
    /// Account that will sign.
    pub account_address: String,
    /// Chain the session is requested for.
    pub chain_id: CaipChainId,
}

impl SiwxMessageInput {
    /// Input for `account_address` on `chain_id`.
    pub fn new(account_address: impl Into<String>, chain_id: CaipChainId) -> Self {
        Self {
            account_address: account_address.into(),
            chain_id,
        }
    }
}

/// Data bound into a sign-in challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiwxMessageData {
    /// Signing account.
    pub account_address: String,
    /// Chain the session is scoped to.
    pub chain_id: CaipChainId,
    /// Requesting domain.
    pub domain: String,
    /// Requesting URI.
    pub uri: String,
    /// Message format version.
    pub version: String,
    /// Per-attempt nonce.
    pub nonce: String,
    /// Issuance time.
    pub issued_at: Option<DateTime<Utc>>,
    /// Time after which the challenge is refused.
    pub expiration_time: Option<DateTime<Utc>>,
    /// Human-readable statement.
    pub statement: Option<String>,
}

impl SiwxMessageData {
    /// Data carrying only the account and chain, as reconstructed from an
    /// external session source.
    pub fn for_account(account_address: impl Into<String>, chain_id: CaipChainId) -> Self {
        Self {
            account_address: account_address.into(),
            chain_id,
            domain: String::new(),
            uri: String::new(),
            version: String::new(),
            nonce: String::new(),
            issued_at: None,
            expiration_time: None,
            statement: None,
        }
    }

    /// Whether the challenge expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time.is_some_and(|expires| expires <= now)
    }
}

/// A sign-in challenge. [`Display`](fmt::Display) renders the text the
/// wallet signs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiwxMessage {
    /// Bound challenge data.
    pub data: SiwxMessageData,
}

impl SiwxMessage {
    /// Challenge over `data`.
    pub fn new(data: SiwxMessageData) -> Self {
        Self { data }
    }
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl fmt::Display for SiwxMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = &self.data;
        writeln!(
            f,
            "{} wants you to sign in with your **blockchain** account:",
            data.domain
        )?;
        writeln!(f, "{}", data.account_address)?;
        writeln!(f)?;
        if let Some(statement) = &data.statement {
            writeln!(f, "{statement}")?;
            writeln!(f)?;
        }
        writeln!(f, "URI: {}", data.uri)?;
        writeln!(f, "Version: {}", data.version)?;
        writeln!(f, "Chain ID: {}", data.chain_id)?;
        write!(f, "Nonce: {}", data.nonce)?;
        if let Some(issued_at) = &data.issued_at {
            write!(f, "\nIssued At: {}", timestamp(issued_at))?;
        }
        if let Some(expiration) = &data.expiration_time {
            write!(f, "\nExpiration Time: {}", timestamp(expiration))?;
        }
        Ok(())
    }
}
