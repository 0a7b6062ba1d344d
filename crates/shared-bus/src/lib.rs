//! # Shared Bus - Reactive State Stores
//!
//! Observable state containers used by the chain controller for the
//! per-namespace account/network snapshots and the controller state itself.
//!
//! ## Notification Model
//!
//! ```text
//! ┌──────────────┐   update()/replace()   ┌──────────────┐
//! │   Mutator    │ ─────────────────────> │   Store<S>   │
//! └──────────────┘                        │              │
//!                                         │  state lock  │
//!                                         │  released    │
//!                                         └──────┬───────┘
//!                         subscribe()            │  subscribe_key()
//!                     ┌──────────────────────────┴──────────────┐
//!                     ▼                                         ▼
//!              full snapshot                            key value changed?
//! ```
//!
//! ## Rules
//!
//! - Observers run synchronously, in subscription order, before the mutating
//!   call returns.
//! - A mutation that leaves the state equal to what it was notifies nobody.
//! - Dropping a [`Subscription`] removes its observer.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod key;
pub mod store;
pub mod subscriber;

pub use key::StateKey;
pub use store::Store;
pub use subscriber::Subscription;
