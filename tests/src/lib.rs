//! # Multichain Kit Test Suite
//!
//! Cross-subsystem flows combining the chain controller, the reactive
//! stores and the SIWX session manager.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs     # Registration, activation, replication, universal adapter
//!     └── sign_in.rs   # Challenge -> wallet signature -> session, revoke
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mk-tests
//! cargo test -p mk-tests integration::sign_in::
//! ```

pub mod integration;

/// Install a quiet global subscriber once per test binary.
pub fn init_test_logging() {
    let config = mk_telemetry::TelemetryConfig {
        console_output: false,
        ..mk_telemetry::TelemetryConfig::for_testing()
    };
    // Several tests race to install it; the first one wins.
    let _ = mk_telemetry::init_logging(&config);
}
