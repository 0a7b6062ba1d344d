//! # Shared Types Crate
//!
//! Vocabulary shared by the chain controller and the SIWX session manager:
//! namespaces, CAIP identifiers, chain descriptors and the per-namespace
//! account/network snapshots.
//!
//! ## Design Principles
//!
//! - **Validated identifiers**: namespaces and chain ids are checked on
//!   construction, so a value of these types always carries a resolvable prefix.
//! - **Snapshots are values**: updates produce new snapshots (`merged`), they
//!   never patch a snapshot another owner may be reading.

pub mod caip;
pub mod entities;
pub mod errors;
pub mod mock;
pub mod namespace;

pub use caip::{parse_evm_chain_id, CaipAddress, CaipChainId, NativeChainId};
pub use entities::*;
pub use errors::*;
pub use mock::mock_signature;
pub use namespace::ChainNamespace;
