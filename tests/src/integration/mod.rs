//! # Integration Flows

pub mod flows;
pub mod sign_in;
