//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod public_state;

pub use public_state::InMemoryPublicState;
