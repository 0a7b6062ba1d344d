//! # Domain Module
//!
//! Challenge data, sessions and errors for sign-in-with-X.

pub mod errors;
pub mod message;
pub mod session;

pub use errors::*;
pub use message::*;
pub use session::*;
