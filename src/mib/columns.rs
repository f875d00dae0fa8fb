//! OIDs of the router's LAN client table and identity objects.

use crate::oid;
use crate::oid::Oid;

/// Arcs of the client table entry (`1.3.6.1.4.1.4115.1.20.1.1.2.4.2.1`).
///
/// Column OIDs append one arc to this prefix. Row keys then append the
/// address-type discriminator (three arcs) and the address bytes.
pub const CLIENT_ENTRY: [u32; 15] = [1, 3, 6, 1, 4, 1, 4115, 1, 20, 1, 1, 2, 4, 2, 1];

/// Number of arcs in a column OID.
pub const COLUMN_ARCS: usize = CLIENT_ENTRY.len() + 1;

/// Arcs between the column OID and the address bytes.
pub const DISCRIMINATOR_ARCS: usize = 3;

/// Columns of the LAN client table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientColumn {
    HostName,
    MacAddress,
    AdapterType,
    ClientType,
    LeaseEnd,
    RowStatus,
    Online,
    Comment,
    FriendlyName,
}

impl ClientColumn {
    pub const ALL: [ClientColumn; 9] = [
        Self::HostName,
        Self::MacAddress,
        Self::AdapterType,
        Self::ClientType,
        Self::LeaseEnd,
        Self::RowStatus,
        Self::Online,
        Self::Comment,
        Self::FriendlyName,
    ];

    /// Last arc of the column OID.
    pub fn arc(&self) -> u32 {
        match self {
            Self::HostName => 3,
            Self::MacAddress => 4,
            Self::AdapterType => 6,
            Self::ClientType => 7,
            Self::LeaseEnd => 9,
            Self::RowStatus => 13,
            Self::Online => 14,
            Self::Comment => 15,
            Self::FriendlyName => 20,
        }
    }

    /// Full column OID.
    pub fn oid(&self) -> Oid {
        Oid::new(CLIENT_ENTRY.iter().copied().chain([self.arc()]))
    }

    /// Look up the column an OID names. Only exact column OIDs match.
    pub fn from_oid(oid: &Oid) -> Option<Self> {
        if oid.len() != COLUMN_ARCS || !oid.starts_with(&Oid::from_slice(&CLIENT_ENTRY)) {
            return None;
        }
        let last = *oid.arcs().last()?;
        Self::ALL.into_iter().find(|c| c.arc() == last)
    }
}

/// Physical address of the router's LAN interface.
pub fn router_mac_address() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 6, 2)
}

/// Hardware revision of the router.
pub fn router_hardware_version() -> Oid {
    oid!(1, 3, 6, 1, 4, 1, 4115, 1, 20, 1, 1, 5, 10, 0)
}

/// Firmware version of the router.
pub fn router_software_version() -> Oid {
    oid!(1, 3, 6, 1, 4, 1, 4115, 1, 20, 1, 1, 5, 11, 0)
}

/// Serial number of the router.
pub fn router_serial_number() -> Oid {
    oid!(1, 3, 6, 1, 4, 1, 4115, 1, 20, 1, 1, 5, 8, 0)
}
