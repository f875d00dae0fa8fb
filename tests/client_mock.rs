//! Client and session tests using MockTransport.
//!
//! These tests verify login, retry and decoding behavior without a router
//! by using a programmable mock transport.
//!
//! Run with: `cargo test --test client_mock`

mod common;

use arris_connectbox::testing::{ManualClock, MockTransport};
use arris_connectbox::{AdapterType, Error, ValuePolicy};
use common::{CONN_DEVICES, ROUTER_INFORMATION, TOKEN, mock_client, mock_client_with_clock};
use std::time::Duration;

const LOGIN: &str = "login";
const LOGOUT: &str = "logout";
const GET_CONN_DEVICES: &str = "getConnDevices";
const SNMP_GET: &str = "snmpGet";

fn logged_in_mock() -> MockTransport {
    let mock = MockTransport::new();
    mock.set_default_response(LOGIN, 200, TOKEN);
    mock
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_returns_token() {
    let mock = logged_in_mock();
    let client = mock_client(&mock, "secret");

    let credential = client.session().login().await.unwrap();
    assert_eq!(credential.token(), TOKEN);
    assert_eq!(credential.user(), "admin");
}

#[tokio::test]
async fn test_login_percent_encodes_password() {
    let mock = logged_in_mock();
    let client = mock_client(&mock, "&=");

    client.session().login().await.unwrap();

    let requests = mock.requests_to(LOGIN);
    assert_eq!(requests[0].query, "arg=YWRtaW46JTI2JTNE&_n=12345");
    assert!(requests[0].credential.is_none());
}

#[tokio::test]
async fn test_login_does_not_escape_base64_padding() {
    let mock = logged_in_mock();
    let client = mock_client(&mock, "secret2");

    client.session().login().await.unwrap();

    let requests = mock.requests_to(LOGIN);
    assert!(requests[0].query.starts_with("arg=YWRtaW46c2VjcmV0Mg==&_n="));
}

#[tokio::test]
async fn test_login_wrong_password_is_http_error() {
    // The router answers a wrong password with 500
    let mock = MockTransport::new();
    mock.queue_status(LOGIN, 500);
    let client = mock_client(&mock, "wrong");

    let err = client.session().login().await.unwrap_err();
    match *err {
        Error::Http { ref endpoint, status } => {
            assert_eq!(&**endpoint, "login");
            assert_eq!(status, 500);
        }
        ref other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_login_html_response_is_invalid_credential() {
    let mock = MockTransport::new();
    mock.queue_response(LOGIN, 200, "<!DOCTYPE html><html><body>hello</body></html>");
    let client = mock_client(&mock, "secret");

    let err = client.session().login().await.unwrap_err();
    assert!(matches!(*err, Error::InvalidCredential { .. }));
    assert!(err.is_connect_box_error());
}

#[tokio::test]
async fn test_login_network_error_propagates() {
    let mock = MockTransport::new();
    mock.queue_network_error(LOGIN, "connection refused");
    let client = mock_client(&mock, "secret");

    let err = client.get_connected_devices().await.unwrap_err();
    assert!(matches!(*err, Error::Network { .. }));
    assert_eq!(mock.request_count(GET_CONN_DEVICES), 0);
}

// ============================================================================
// Connected devices
// ============================================================================

#[tokio::test]
async fn test_get_connected_devices() {
    let mock = logged_in_mock();
    mock.queue_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    let client = mock_client(&mock, "secret");

    let devices = client.get_connected_devices().await.unwrap();
    assert_eq!(devices.len(), 4);
    assert_eq!(devices[0].hostname.as_deref(), Some("My Device"));
    assert_eq!(devices[1].adapter_type, Some(AdapterType::Ethernet2));

    let requests = mock.requests_to(GET_CONN_DEVICES);
    assert_eq!(requests[0].query, "_n=12345");
    assert_eq!(requests[0].credential.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_get_connected_devices_401_once_relogs() {
    let mock = logged_in_mock();
    mock.queue_status(GET_CONN_DEVICES, 401);
    mock.queue_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    let client = mock_client(&mock, "secret");

    let devices = client.get_connected_devices().await.unwrap();
    assert_eq!(devices.len(), 4);
    assert_eq!(mock.request_count(LOGIN), 2);
    assert_eq!(mock.request_count(GET_CONN_DEVICES), 2);
    assert_eq!(mock.queued_response_count(), 0);
}

#[tokio::test]
async fn test_get_connected_devices_401_request_order() {
    let mock = logged_in_mock();
    mock.queue_status(GET_CONN_DEVICES, 401);
    mock.queue_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    let client = mock_client(&mock, "secret");

    client.get_connected_devices().await.unwrap();

    let endpoints: Vec<_> = mock.requests().iter().map(|r| r.endpoint).collect();
    assert_eq!(endpoints, [LOGIN, GET_CONN_DEVICES, LOGIN, GET_CONN_DEVICES]);

    // Both attempts present the credential cookie
    let devices = mock.requests_to(GET_CONN_DEVICES);
    assert!(devices.iter().all(|r| r.credential.as_deref() == Some(TOKEN)));

    // A cached credential is reused without another login
    mock.clear_requests();
    assert!(mock.requests().is_empty());
    mock.queue_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    client.get_connected_devices().await.unwrap();

    let endpoints: Vec<_> = mock.requests().iter().map(|r| r.endpoint).collect();
    assert_eq!(endpoints, [GET_CONN_DEVICES]);
}

#[tokio::test]
async fn test_get_connected_devices_401_twice_fails() {
    let mock = logged_in_mock();
    mock.set_default_response(GET_CONN_DEVICES, 401, "");
    let client = mock_client(&mock, "secret");

    let err = client.get_connected_devices().await.unwrap_err();
    assert!(matches!(*err, Error::Http { status: 401, .. }));
    assert_eq!(mock.request_count(LOGIN), 2);
    assert_eq!(mock.request_count(GET_CONN_DEVICES), 2);
}

#[tokio::test]
async fn test_get_connected_devices_other_status_not_retried() {
    let mock = logged_in_mock();
    mock.queue_status(GET_CONN_DEVICES, 503);
    let client = mock_client(&mock, "secret");

    let err = client.get_connected_devices().await.unwrap_err();
    assert!(matches!(*err, Error::Http { status: 503, .. }));
    assert_eq!(mock.request_count(LOGIN), 1);
    assert_eq!(mock.request_count(GET_CONN_DEVICES), 1);
}

#[tokio::test]
async fn test_get_connected_devices_bad_value_fails_strict() {
    let mock = logged_in_mock();
    mock.queue_response(
        GET_CONN_DEVICES,
        200,
        r#"{"1.3.6.1.4.1.4115.1.20.1.1.2.4.2.1.4.200.1.4.192.168.178.2": "not-a-mac"}"#,
    );
    let client = mock_client(&mock, "secret");

    let err = client.get_connected_devices().await.unwrap_err();
    assert!(matches!(*err, Error::InvalidValue { .. }));
}

#[tokio::test]
async fn test_get_connected_devices_lenient_policy() {
    let mock = logged_in_mock();
    mock.queue_response(
        GET_CONN_DEVICES,
        200,
        r#"{
            "1.3.6.1.4.1.4115.1.20.1.1.2.4.2.1.3.200.1.4.192.168.178.2": "My Device",
            "1.3.6.1.4.1.4115.1.20.1.1.2.4.2.1.4.200.1.4.192.168.178.2": "not-a-mac",
            "1.3.6.1.4.1.4115.1.20.1.1.2.4.2.1.6.200.1.4.192.168.178.2": "99"
        }"#,
    );
    let client = arris_connectbox::ClientBuilder::new("unused", "secret")
        .nonce(12345)
        .value_policy(ValuePolicy::Lenient)
        .build_with(mock.clone())
        .unwrap();

    let devices = client.get_connected_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].hostname.as_deref(), Some("My Device"));
    assert_eq!(devices[0].mac_address, None);
    assert_eq!(devices[0].adapter_type, None);
}

#[tokio::test]
async fn test_get_connected_devices_non_object_body() {
    let mock = logged_in_mock();
    mock.queue_response(GET_CONN_DEVICES, 200, "<html></html>");
    let client = mock_client(&mock, "secret");

    let err = client.get_connected_devices().await.unwrap_err();
    assert!(matches!(*err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_online_devices_dedupes_by_mac() {
    let mock = logged_in_mock();
    mock.queue_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    let client = mock_client(&mock, "secret");

    let devices = client.online_devices().await.unwrap();
    let macs: Vec<_> = devices
        .iter()
        .map(|d| d.mac_address.as_deref().unwrap())
        .collect();
    assert_eq!(
        macs,
        ["12:34:56:78:90:AB", "BA:09:87:65:43:21", "AA:AA:AA:AA:AA:AA"]
    );
}

// ============================================================================
// Credential cache
// ============================================================================

#[tokio::test]
async fn test_credential_reused_before_expiry() {
    let mock = logged_in_mock();
    mock.set_default_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    let clock = ManualClock::new();
    let client = mock_client_with_clock(&mock, "secret", &clock);

    client.get_connected_devices().await.unwrap();
    clock.advance(Duration::from_secs(299));
    client.get_connected_devices().await.unwrap();

    assert_eq!(mock.request_count(LOGIN), 1);
}

#[tokio::test]
async fn test_credential_renewed_after_expiry() {
    let mock = logged_in_mock();
    mock.set_default_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    let clock = ManualClock::new();
    let client = mock_client_with_clock(&mock, "secret", &clock);

    client.get_connected_devices().await.unwrap();
    clock.advance(Duration::from_secs(301));
    client.get_connected_devices().await.unwrap();

    assert_eq!(mock.request_count(LOGIN), 2);
}

#[tokio::test]
async fn test_clones_share_credential() {
    let mock = logged_in_mock();
    mock.set_default_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    let client = mock_client(&mock, "secret");
    let other = client.clone();

    client.get_connected_devices().await.unwrap();
    other.get_connected_devices().await.unwrap();

    assert_eq!(mock.request_count(LOGIN), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_credential() {
    const TASKS: usize = 16;

    let mock = logged_in_mock();
    mock.set_default_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    let client = mock_client(&mock, "secret");

    let handles: Vec<_> = (0..TASKS)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get_connected_devices().await })
        })
        .collect();

    for handle in handles {
        let devices = handle.await.unwrap().unwrap();
        assert_eq!(devices.len(), 4);
    }

    // Callers that miss together may each log in; one of them wins the slot
    let logins = mock.request_count(LOGIN);
    assert!((1..=TASKS).contains(&logins), "logins = {}", logins);

    let credential = client.session().credential().await.unwrap();
    assert_eq!(credential.token(), TOKEN);
    assert_eq!(mock.request_count(LOGIN), logins);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_with_invalidate() {
    const TASKS: usize = 16;

    let mock = logged_in_mock();
    mock.set_default_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    let client = mock_client(&mock, "secret");

    let handles: Vec<_> = (0..TASKS)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                if i % 2 == 0 {
                    client.session().invalidate();
                }
                client.get_connected_devices().await
            })
        })
        .collect();

    for handle in handles {
        let devices = handle.await.unwrap().unwrap();
        assert_eq!(devices.len(), 4);
    }

    // Every fetch needs a credential, so at most one login per task
    let logins = mock.request_count(LOGIN);
    assert!((1..=TASKS).contains(&logins), "logins = {}", logins);
    assert_eq!(mock.request_count(GET_CONN_DEVICES), TASKS);

    client.session().credential().await.unwrap();
    assert_eq!(mock.request_count(LOGIN), logins);
}

// ============================================================================
// Router information
// ============================================================================

#[tokio::test]
async fn test_get_router_information() {
    let mock = logged_in_mock();
    mock.queue_response(SNMP_GET, 200, ROUTER_INFORMATION);
    let client = mock_client(&mock, "secret");

    let info = client.get_router_information().await.unwrap();
    assert_eq!(info.mac_address, "12:34:56:78:90:ab");
    assert_eq!(info.hardware_version, "10");
    assert_eq!(info.software_version, "9.1.2103.102");
    assert_eq!(info.serial_number, "ABCD12345678");

    let requests = mock.requests_to(SNMP_GET);
    assert_eq!(
        requests[0].query,
        "oids=1.3.6.1.2.1.2.2.1.6.2;1.3.6.1.4.1.4115.1.20.1.1.5.10.0;\
         1.3.6.1.4.1.4115.1.20.1.1.5.11.0;1.3.6.1.4.1.4115.1.20.1.1.5.8.0;&_n=12345"
    );
}

#[tokio::test]
async fn test_get_router_information_error_body() {
    let mock = logged_in_mock();
    mock.queue_response(SNMP_GET, 200, "Error: oid not found");
    let client = mock_client(&mock, "secret");

    let err = client.get_router_information().await.unwrap_err();
    match *err {
        Error::ConnectBox { ref message } => assert_eq!(&**message, "Error: oid not found"),
        ref other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_get_router_information_indented_error_is_malformed() {
    let mock = logged_in_mock();
    mock.queue_response(SNMP_GET, 200, "  Error: oid not found");
    let client = mock_client(&mock, "secret");

    let err = client.get_router_information().await.unwrap_err();
    assert!(matches!(*err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_get_router_information_missing_oid() {
    let mock = logged_in_mock();
    mock.queue_response(SNMP_GET, 200, r#"{"1.3.6.1.2.1.2.2.1.6.2": "$1234567890ab"}"#);
    let client = mock_client(&mock, "secret");

    let err = client.get_router_information().await.unwrap_err();
    assert!(matches!(*err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_get_router_information_401_once_relogs() {
    let mock = logged_in_mock();
    mock.queue_status(SNMP_GET, 401);
    mock.queue_response(SNMP_GET, 200, ROUTER_INFORMATION);
    let client = mock_client(&mock, "secret");

    client.get_router_information().await.unwrap();
    assert_eq!(mock.request_count(LOGIN), 2);
    assert_eq!(mock.request_count(SNMP_GET), 2);
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_accepts_500() {
    let mock = logged_in_mock();
    mock.queue_status(LOGOUT, 500);
    let client = mock_client(&mock, "secret");

    client.logout().await.unwrap();
    assert_eq!(mock.request_count(LOGOUT), 1);
}

#[tokio::test]
async fn test_logout_401_is_error() {
    let mock = logged_in_mock();
    mock.queue_status(LOGOUT, 401);
    let client = mock_client(&mock, "secret");

    let err = client.logout().await.unwrap_err();
    assert!(matches!(*err, Error::Http { status: 401, .. }));
    assert_eq!(mock.request_count(LOGOUT), 1);
}

#[tokio::test]
async fn test_logout_drops_credential() {
    let mock = logged_in_mock();
    mock.set_default_response(GET_CONN_DEVICES, 200, CONN_DEVICES);
    mock.queue_status(LOGOUT, 200);
    let client = mock_client(&mock, "secret");

    client.get_connected_devices().await.unwrap();
    client.logout().await.unwrap();
    client.get_connected_devices().await.unwrap();

    assert_eq!(mock.request_count(LOGIN), 2);
}
