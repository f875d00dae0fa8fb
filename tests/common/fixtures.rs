//! Recorded router responses and client helpers.

use arris_connectbox::testing::{ManualClock, MockTransport};
use arris_connectbox::{Client, ClientConfig, ValuePolicy};
use std::time::Duration;

/// `getConnDevices` body with four row groups: two IPv4, two IPv6.
pub const CONN_DEVICES: &str = include_str!("../fixtures/getConnDevices-response.json");

/// `snmpGet` body answering the four router identity OIDs.
pub const ROUTER_INFORMATION: &str = include_str!("../fixtures/snmpGet-response.json");

/// base64 of `{"name": "admin"}`, as the router returns from `/login`.
pub const TOKEN: &str = "eyJuYW1lIjogImFkbWluIn0=";

pub const NONCE: u32 = 12345;

pub fn config() -> ClientConfig {
    ClientConfig {
        timeout: Duration::from_secs(1),
        credential_ttl: Duration::from_secs(300),
        nonce: NONCE,
        value_policy: ValuePolicy::Strict,
    }
}

/// Client over `mock` with a fixed nonce.
pub fn mock_client(mock: &MockTransport, password: &str) -> Client<MockTransport> {
    Client::new(mock.clone(), password, config())
}

/// Client over `mock` whose credential expiry follows `clock`.
pub fn mock_client_with_clock(
    mock: &MockTransport,
    password: &str,
    clock: &ManualClock,
) -> Client<MockTransport, ManualClock> {
    Client::with_clock(mock.clone(), password, config(), clock.clone())
}
