//! Decoder for the router's JSON rendering of its LAN client table.
//!
//! The `getConnDevices` endpoint answers with one flat JSON object. Each key
//! is a column OID followed by a row index, each value is a string:
//!
//! ```text
//! "1.3.6.1.4.1.4115.1.20.1.1.2.4.2.1.3.200.1.4.192.168.178.2": "My Device"
//!  \_________ column (16 arcs) ________/ \ 3 /\___ address ___/
//! ```
//!
//! The three arcs after the column select the address family and length and
//! are not needed; the remaining arcs are the address bytes (4 for IPv4, 16
//! for IPv6). Keys with fewer than 19 arcs (such as a trailing `"1": "Finish"`)
//! are not table rows and are skipped.
//!
//! Key order matters. Rows for one address are emitted together, and a new
//! [`DeviceRecord`] is started whenever the address differs from the record
//! currently being filled. Rows for the same address separated by another
//! address therefore produce two records.

mod columns;
mod format;

pub use columns::{
    CLIENT_ENTRY, COLUMN_ARCS, ClientColumn, DISCRIMINATOR_ARCS, router_hardware_version,
    router_mac_address, router_serial_number, router_software_version,
};
pub use format::{format_date, format_mac};

use std::borrow::Cow;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde_json::{Map, Value};

use crate::device::{AdapterType, ClientType, DeviceRecord};
use crate::error::{Error, Result, ValueErrorKind};
use crate::oid::Oid;

/// What the decoder does with a value it cannot decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValuePolicy {
    /// Fail the whole decode (default).
    #[default]
    Strict,
    /// Log the value and leave the field unset. Rows whose key does not carry
    /// a valid address are skipped.
    Lenient,
}

/// Decode a `getConnDevices` body with [`ValuePolicy::Strict`].
///
/// # Examples
///
/// ```
/// use arris_connectbox::mib::decode_devices;
///
/// let body = r#"{
///     "1.3.6.1.4.1.4115.1.20.1.1.2.4.2.1.3.200.1.4.192.168.178.2": "My Device",
///     "1.3.6.1.4.1.4115.1.20.1.1.2.4.2.1.14.200.1.4.192.168.178.2": "1",
///     "1": "Finish"
/// }"#;
///
/// let devices = decode_devices(body).unwrap();
/// assert_eq!(devices.len(), 1);
/// assert_eq!(devices[0].hostname.as_deref(), Some("My Device"));
/// assert!(devices[0].online);
/// ```
pub fn decode_devices(body: &str) -> Result<Vec<DeviceRecord>> {
    decode_devices_with(body, ValuePolicy::Strict)
}

/// Decode a `getConnDevices` body.
pub fn decode_devices_with(body: &str, policy: ValuePolicy) -> Result<Vec<DeviceRecord>> {
    let rows = parse_object(body)?;
    let mut devices: Vec<DeviceRecord> = Vec::new();

    for (key, value) in &rows {
        let row = match RowKey::parse(key) {
            Ok(Some(row)) => row,
            Ok(None) => {
                tracing::debug!(target: "arris_connectbox::mib", { key = %key, value = %value }, "skipping non-table key");
                continue;
            }
            Err(e) if policy == ValuePolicy::Lenient => {
                tracing::warn!(target: "arris_connectbox::mib", { key = %key, error = %e }, "skipping row with invalid index");
                continue;
            }
            Err(e) => return Err(e),
        };

        if devices.last().is_none_or(|d| d.address != row.address) {
            devices.push(DeviceRecord::new(row.address));
        }
        let Some(current) = devices.last_mut() else {
            continue;
        };

        let Some(column) = row.column.as_ref().and_then(ClientColumn::from_oid) else {
            tracing::warn!(target: "arris_connectbox::mib", { key = %key }, "unknown OID");
            continue;
        };

        let raw = value_text(value);
        match apply(current, column, &raw) {
            Ok(()) => {}
            Err(e) if policy == ValuePolicy::Lenient => {
                tracing::warn!(target: "arris_connectbox::mib", { key = %key, ?column, error = %e }, "ignoring undecodable value");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(target: "arris_connectbox::mib", { rows = rows.len(), devices = devices.len() }, "decoded client table");
    Ok(devices)
}

/// Parse a body into an insertion-ordered JSON object.
pub(crate) fn parse_object(body: &str) -> Result<Map<String, Value>> {
    // serde_json is built with preserve_order, so Map keeps the router's key order
    serde_json::from_str(body).map_err(|e| {
        Error::MalformedResponse {
            reason: format!("expected a JSON object: {}", e).into(),
        }
        .boxed()
    })
}

/// Text of a payload value. The router sends strings; anything else is
/// rendered as JSON.
pub(crate) fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

fn apply(device: &mut DeviceRecord, column: ClientColumn, raw: &str) -> Result<()> {
    match column {
        ClientColumn::HostName => device.hostname = Some(raw.to_string()),
        ClientColumn::MacAddress => device.mac_address = Some(format_mac(raw)?),
        ClientColumn::AdapterType => device.adapter_type = Some(AdapterType::decode(raw)?),
        ClientColumn::ClientType => device.client_type = Some(ClientType::decode(raw)?),
        ClientColumn::LeaseEnd => device.lease_end = Some(format_date(raw)?),
        ClientColumn::RowStatus => device.row_status = Some(raw.to_string()),
        ClientColumn::Online => device.online = raw == "1",
        ClientColumn::Comment => device.comment = Some(raw.to_string()),
        ClientColumn::FriendlyName => device.friendly_name = Some(raw.to_string()),
    }
    Ok(())
}

/// Column and address decoded from a table row key.
#[derive(Debug)]
struct RowKey {
    /// `None` when the column arcs are not numeric; such rows still open a
    /// record but match no column.
    column: Option<Oid>,
    address: IpAddr,
}

impl RowKey {
    /// Returns `Ok(None)` for keys that are too short to be table rows.
    fn parse(key: &str) -> Result<Option<Self>> {
        let segments: Vec<&str> = key.split('.').collect();
        let index_start = COLUMN_ARCS + DISCRIMINATOR_ARCS;
        if segments.len() < index_start {
            return Ok(None);
        }

        let column = Oid::from_segments(segments[..COLUMN_ARCS].iter().copied());
        let address = parse_address(&segments[index_start..])
            .ok_or_else(|| Error::invalid_value(ValueErrorKind::InvalidAddress, key))?;

        Ok(Some(Self { column, address }))
    }
}

fn parse_address(segments: &[&str]) -> Option<IpAddr> {
    let bytes: Vec<u8> = segments
        .iter()
        .map(|s| s.parse::<u8>().ok())
        .collect::<Option<_>>()?;

    match bytes.len() {
        4 => {
            let octets: [u8; 4] = bytes.try_into().ok()?;
            Some(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        16 => {
            let octets: [u8; 16] = bytes.try_into().ok()?;
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => None,
    }
}
