//! # MK-01 Chain Controller
//!
//! Multi-namespace chain coordinator for a wallet-connection toolkit.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Keep one adapter entry per chain namespace (`eip155`, `solana`, ...)
//! holding the namespace's clients and its account/network snapshots, track
//! which namespace is active, and keep the globally observed account and
//! network stores equal to the active namespace's snapshots.
//!
//! ## Replication Rule
//!
//! | Write | Reaches the global store when |
//! |-------|-------------------------------|
//! | network data | `replace`, single adapter, or target is active |
//! | account data | same rule; callers normally pass `replace = true` |
//! | active chain switch | always (both stores) |
//! | active network switch | always (network store) |
//!
//! ## Module Structure
//!
//! ```text
//! mk-01-chain-controller/
//! ├── domain/          # ChainAdapter, coordinator state, state keys, errors
//! ├── ports/           # API trait (inbound) + client traits (outbound)
//! ├── adapters/        # InMemoryPublicState
//! ├── stores.rs        # Global account/network stores
//! ├── service.rs       # ChainController
//! └── config.rs        # ChainControllerConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;
pub mod stores;

// Re-exports
pub use adapters::InMemoryPublicState;
pub use config::ChainControllerConfig;
pub use domain::{
    account_keys, adapter_keys, controller_keys, network_keys, AdapterInit, ChainAdapter,
    ChainControllerError, ChainControllerState, ClientError, ConnectionClientRef,
    NetworkClientRef, PublicState, PublicStateUpdate, UniversalAdapter,
};
pub use ports::{
    ApprovedNetworks, ChainControllerApi, ConnectionControllerClient,
    MockConnectionClient, MockNetworkClient, NetworkControllerClient, PublicStatePublisher,
};
pub use service::ChainController;
pub use stores::{AccountController, NetworkController, ObservedStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
