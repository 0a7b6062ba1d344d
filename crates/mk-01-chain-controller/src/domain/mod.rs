//! # Domain Module
//!
//! Core types for the Chain Coordinator: adapters, coordinator state, keys
//! and errors.

pub mod adapter;
pub mod errors;
pub mod keys;
pub mod state;

pub use adapter::*;
pub use errors::*;
pub use keys::*;
pub use state::*;
