//! # Sessions

use crate::domain::message::{SiwxMessage, SiwxMessageData};
use serde::{Deserialize, Serialize};
use shared_types::{ChainNamespace, NativeChainId};

/// A signed challenge; persisted once verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiwxSession {
    /// Challenge data the session was issued for.
    pub data: SiwxMessageData,
    /// Rendered challenge text that was signed.
    pub message: String,
    /// Wallet signature over `message`.
    pub signature: String,
}

impl SiwxSession {
    /// Session for `message` signed with `signature`.
    pub fn new(message: &SiwxMessage, signature: impl Into<String>) -> Self {
        Self {
            data: message.data.clone(),
            message: message.to_string(),
            signature: signature.into(),
        }
    }

    /// Namespace of the session chain.
    pub fn namespace(&self) -> &ChainNamespace {
        self.data.chain_id.namespace()
    }

    /// Chain id without its namespace.
    pub fn native_chain_id(&self) -> NativeChainId {
        self.data.chain_id.native_chain_id()
    }
}
