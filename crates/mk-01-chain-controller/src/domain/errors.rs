//! # Domain Errors
//!
//! Error types for the Chain Coordinator.
//!
//! Every variant except [`ChainControllerError::Client`] is a configuration
//! error: fatal, raised at the point of detection, never retried.

use shared_types::ChainNamespace;
use thiserror::Error;

/// Chain coordinator error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainControllerError {
    /// `initialize` was called without any adapter.
    #[error("Adapter is required to initialize the chain controller")]
    EmptyAdapterList,

    /// The operation needs a namespace and none could be resolved.
    #[error("Chain namespace is required for {operation}")]
    MissingNamespace {
        /// Operation that needed the namespace.
        operation: &'static str,
    },

    /// No adapter is registered for the namespace.
    #[error("Chain adapter not found: {0}")]
    AdapterNotFound(ChainNamespace),

    /// The adapter exists but its network client was never set.
    #[error("Network controller client not set for {0}")]
    NetworkClientNotSet(ChainNamespace),

    /// The adapter exists but its connection client was never set.
    #[error("Connection controller client not set for {0}")]
    ConnectionClientNotSet(ChainNamespace),

    /// Universal-adapter-only mode without a universal network client.
    #[error("Universal adapter's network controller client is not set")]
    UniversalNetworkClientNotSet,

    /// Universal-adapter-only mode without a universal connection client.
    #[error("Universal adapter's connection controller client is not set")]
    UniversalConnectionClientNotSet,

    /// A control client rejected a request.
    #[error("Control client error: {0}")]
    Client(#[from] ClientError),
}

impl ChainControllerError {
    /// Whether this is a setup error (as opposed to a runtime client failure).
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Client(_))
    }
}

/// Errors reported by network/connection control clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The wallet or user declined the request.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The client could not reach its provider.
    #[error("Transport error: {0}")]
    Transport(String),
}
