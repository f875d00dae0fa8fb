//! LAN client records and router identity.

use std::fmt;
use std::net::IpAddr;

use crate::error::{Error, Result, ValueErrorKind};

/// Physical or radio interface a LAN client is attached through.
///
/// Wire values 0..=23. The enumeration is closed: decoding an integer outside
/// it fails with [`ValueErrorKind::UnknownAdapterType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterType {
    Unknown,
    Ethernet,
    Usb,
    Moca,
    Dsg,
    Wireless1,
    Wireless2,
    Wireless3,
    Wireless4,
    Wireless5,
    Wireless6,
    Wireless7,
    Wireless8,
    Wireless9,
    Wireless10,
    Wireless11,
    Wireless12,
    Wireless13,
    Wireless14,
    Wireless15,
    Wireless16,
    Ethernet2,
    Ethernet3,
    Ethernet4,
}

impl AdapterType {
    const ALL: [AdapterType; 24] = [
        Self::Unknown,
        Self::Ethernet,
        Self::Usb,
        Self::Moca,
        Self::Dsg,
        Self::Wireless1,
        Self::Wireless2,
        Self::Wireless3,
        Self::Wireless4,
        Self::Wireless5,
        Self::Wireless6,
        Self::Wireless7,
        Self::Wireless8,
        Self::Wireless9,
        Self::Wireless10,
        Self::Wireless11,
        Self::Wireless12,
        Self::Wireless13,
        Self::Wireless14,
        Self::Wireless15,
        Self::Wireless16,
        Self::Ethernet2,
        Self::Ethernet3,
        Self::Ethernet4,
    ];

    /// Create from the raw wire value.
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Convert to the raw wire value.
    pub fn as_u32(&self) -> u32 {
        // declaration order is wire order
        *self as u32
    }

    /// Name used by the router's web interface (e.g. `"wireless1"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Ethernet => "ethernet",
            Self::Usb => "usb",
            Self::Moca => "moca",
            Self::Dsg => "dsg",
            Self::Wireless1 => "wireless1",
            Self::Wireless2 => "wireless2",
            Self::Wireless3 => "wireless3",
            Self::Wireless4 => "wireless4",
            Self::Wireless5 => "wireless5",
            Self::Wireless6 => "wireless6",
            Self::Wireless7 => "wireless7",
            Self::Wireless8 => "wireless8",
            Self::Wireless9 => "wireless9",
            Self::Wireless10 => "wireless10",
            Self::Wireless11 => "wireless11",
            Self::Wireless12 => "wireless12",
            Self::Wireless13 => "wireless13",
            Self::Wireless14 => "wireless14",
            Self::Wireless15 => "wireless15",
            Self::Wireless16 => "wireless16",
            Self::Ethernet2 => "ethernet2",
            Self::Ethernet3 => "ethernet3",
            Self::Ethernet4 => "ethernet4",
        }
    }

    /// Whether the client is attached over Wi-Fi.
    pub fn is_wireless(&self) -> bool {
        (5..=20).contains(&self.as_u32())
    }

    /// Decode a raw payload value such as `"5"`.
    pub(crate) fn decode(raw: &str) -> Result<Self> {
        let value = parse_u32(raw)?;
        Self::from_u32(value)
            .ok_or_else(|| Error::invalid_value(ValueErrorKind::UnknownAdapterType(value), raw))
    }
}

impl fmt::Display for AdapterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a LAN client obtained its address.
///
/// Wire values are not contiguous: 2, 3 and 4 are reserved and fail to decode
/// with [`ValueErrorKind::UnknownClientType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientType {
    Unknown,
    Dynamic,
    Static,
    DynamicReserved,
}

impl ClientType {
    /// Create from the raw wire value.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Dynamic),
            5 => Some(Self::Static),
            6 => Some(Self::DynamicReserved),
            _ => None,
        }
    }

    /// Convert to the raw wire value.
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Dynamic => 1,
            Self::Static => 5,
            Self::DynamicReserved => 6,
        }
    }

    pub(crate) fn decode(raw: &str) -> Result<Self> {
        let value = parse_u32(raw)?;
        Self::from_u32(value)
            .ok_or_else(|| Error::invalid_value(ValueErrorKind::UnknownClientType(value), raw))
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Dynamic => write!(f, "dynamic"),
            Self::Static => write!(f, "static"),
            Self::DynamicReserved => write!(f, "dynamic-reserved"),
        }
    }
}

fn parse_u32(raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid_value(ValueErrorKind::InvalidInteger, raw))
}

/// One LAN client row group from the router's client table.
///
/// A device reachable over both IPv4 and IPv6 appears as two records, one
/// per address. Fields the payload did not carry stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Address the rows of this record were indexed by.
    pub address: IpAddr,
    pub hostname: Option<String>,
    /// Colon separated, case preserved from the payload.
    pub mac_address: Option<String>,
    pub adapter_type: Option<AdapterType>,
    pub client_type: Option<ClientType>,
    /// `YYYY-MM-DD HH:MM:SS:ff`, or all zeros when there is no lease.
    pub lease_end: Option<String>,
    pub row_status: Option<String>,
    pub online: bool,
    pub comment: Option<String>,
    pub friendly_name: Option<String>,
}

impl DeviceRecord {
    /// Create an empty record for an address.
    pub fn new(address: IpAddr) -> Self {
        Self {
            address,
            hostname: None,
            mac_address: None,
            adapter_type: None,
            client_type: None,
            lease_end: None,
            row_status: None,
            online: false,
            comment: None,
            friendly_name: None,
        }
    }
}

impl fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ip: {}, hostname: {}",
            self.address,
            self.hostname.as_deref().unwrap_or("-")
        )
    }
}

/// Identity of the router itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterInformation {
    pub mac_address: String,
    pub hardware_version: String,
    pub software_version: String,
    pub serial_number: String,
}
