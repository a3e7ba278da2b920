//! Data structures carried by the pfsync status codec.
//!
//! These are plain values: built fresh for every encode or decode call and
//! never shared.  A peer that is not configured is `None` rather than a
//! zeroed address, so "no peer" and the all-zeros address stay distinct.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::NameError;

/// BSD `AF_INET`.
pub const AF_INET: u64 = 2;
/// BSD `AF_INET6`.
pub const AF_INET6: u64 = 28;

/// Interface name buffer size, terminator included.
pub const IFNAMSIZ: usize = 16;

/// Default pfsync multicast group, used when no explicit peer is set.
pub const PFSYNC_GROUP: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 240);

/// Default number of batched updates.
pub const DEFAULT_MAX_UPDATES: u8 = 128;

/// Address families understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    Inet,
    Inet6,
}

impl AddressFamily {
    pub const fn code(self) -> u64 {
        match self {
            AddressFamily::Inet => AF_INET,
            AddressFamily::Inet6 => AF_INET6,
        }
    }

    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            AF_INET => Some(AddressFamily::Inet),
            AF_INET6 => Some(AddressFamily::Inet6),
            _ => None,
        }
    }

    /// Number of bytes in a bare address of this family.
    pub const fn address_len(self) -> usize {
        match self {
            AddressFamily::Inet => 4,
            AddressFamily::Inet6 => 16,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Inet => f.write_str("inet"),
            AddressFamily::Inet6 => f.write_str("inet6"),
        }
    }
}

/// Allow-list of address families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilySet {
    inet: bool,
    inet6: bool,
}

impl FamilySet {
    pub const NONE: FamilySet = FamilySet {
        inet: false,
        inet6: false,
    };

    /// Families enabled by the `inet` / `inet6` cargo features.
    pub const fn compiled() -> Self {
        FamilySet {
            inet: cfg!(feature = "inet"),
            inet6: cfg!(feature = "inet6"),
        }
    }

    pub fn from_families<I: IntoIterator<Item = AddressFamily>>(families: I) -> Self {
        families.into_iter().fold(Self::NONE, |set, af| set.with(af))
    }

    pub const fn with(mut self, family: AddressFamily) -> Self {
        match family {
            AddressFamily::Inet => self.inet = true,
            AddressFamily::Inet6 => self.inet6 = true,
        }
        self
    }

    pub const fn contains(&self, family: AddressFamily) -> bool {
        match family {
            AddressFamily::Inet => self.inet,
            AddressFamily::Inet6 => self.inet6,
        }
    }

    pub const fn intersect(self, other: FamilySet) -> Self {
        FamilySet {
            inet: self.inet && other.inet,
            inet6: self.inet6 && other.inet6,
        }
    }

    pub const fn is_empty(&self) -> bool {
        !self.inet && !self.inet6
    }

    /// Look up a wire family code, honouring the allow-list.
    pub const fn lookup(&self, code: u64) -> Option<AddressFamily> {
        match AddressFamily::from_code(code) {
            Some(af) if self.contains(af) => Some(af),
            _ => None,
        }
    }
}

impl Default for FamilySet {
    fn default() -> Self {
        Self::compiled()
    }
}

/// Transport endpoint of the sync peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerAddress {
    pub addr: IpAddr,
    /// 0 when the wire revision carries no port.
    pub port: u16,
}

impl PeerAddress {
    pub const fn new(addr: IpAddr) -> Self {
        Self { addr, port: 0 }
    }

    pub const fn with_port(addr: IpAddr, port: u16) -> Self {
        Self { addr, port }
    }

    pub const fn family(&self) -> AddressFamily {
        match self.addr {
            IpAddr::V4(_) => AddressFamily::Inet,
            IpAddr::V6(_) => AddressFamily::Inet6,
        }
    }
}

impl From<IpAddr> for PeerAddress {
    fn from(addr: IpAddr) -> Self {
        Self::new(addr)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

/// Name of the interface pfsync sends its traffic over.
///
/// Holds at most `IFNAMSIZ - 1` bytes and never a NUL, so it always fits the
/// kernel's fixed-size buffer.  Empty means no device is bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DeviceName(String);

impl DeviceName {
    pub const MAX_LEN: usize = IFNAMSIZ - 1;

    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.len() > Self::MAX_LEN {
            return Err(NameError::TooLong {
                name: name.to_string(),
                len: name.len(),
                max: Self::MAX_LEN,
            });
        }
        if name.contains('\0') {
            return Err(NameError::EmbeddedNul);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags! {
    /// Protocol feature bits.  Bits this crate does not name are kept as-is.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u64 {
        /// Bulk update finished; state tables are in sync.
        const OK = 0x0000_0001;
        /// Defer forwarding of the first packet until the peer acks the state.
        const DEFER = 0x0000_0002;
    }
}

/// Synchronization status of a pfsync interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerStatus {
    pub sync_device_name: DeviceName,
    pub max_updates: u8,
    pub flags: StatusFlags,
    pub peer: Option<PeerAddress>,
}

impl PeerStatus {
    pub fn defer(&self) -> bool {
        self.flags.contains(StatusFlags::DEFER)
    }

    pub fn sync_ok(&self) -> bool {
        self.flags.contains(StatusFlags::OK)
    }
}
