//! Shared test infrastructure for arris-connectbox.
//!
//! Provides recorded router responses and client constructors over the mock
//! transport.

// Allow dead code and unused imports since not all test files use all utilities
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

pub use fixtures::{CONN_DEVICES, ROUTER_INFORMATION, TOKEN, mock_client, mock_client_with_clock};
