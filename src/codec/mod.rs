//! Status and peer-address codec.
//!
//! Converts [`PeerStatus`] / [`PeerAddress`] values to and from a
//! [`WireContainer`].  Three revisions of the address record have been
//! deployed and they are not mutually compatible, so the revision is an
//! explicit parameter of [`AddressCodec`] rather than something guessed from
//! the input.
//!
//! ## Address record
//!
//! ```text
//! af       number   BSD family code (2 = inet, 28 = inet6)
//! address  binary   see WireRevision
//! port     number   bare-port revision only, omitted when 0
//! ```
//!
//! Every function here is pure: no logging, no retained references, and on
//! failure no value or container is handed back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::container::{NvList, ValueKind, WireContainer};
use crate::error::{DecodeError, EncodeError};
use crate::types::{AddressFamily, FamilySet, PeerAddress, PeerStatus};

mod address;
mod status;

/// Layout of the `address` blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireRevision {
    /// Whole BSD `sockaddr_in` (16 bytes) or `sockaddr_in6` (28 bytes).
    /// The port travels inside the structure; padding is always zero.
    Sockaddr,
    /// Bare 4 or 16 address bytes, no port.
    Bare,
    /// Bare address bytes plus an optional `port` number.
    #[default]
    BarePort,
}

impl WireRevision {
    /// Exact length of the `address` blob for `family`.
    pub const fn address_len(self, family: AddressFamily) -> usize {
        match self {
            WireRevision::Sockaddr => address::sockaddr_len(family),
            WireRevision::Bare | WireRevision::BarePort => family.address_len(),
        }
    }

    /// Whether a separate `port` key is part of the record.
    pub const fn has_port_key(self) -> bool {
        matches!(self, WireRevision::BarePort)
    }
}

impl fmt::Display for WireRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireRevision::Sockaddr => "sockaddr",
            WireRevision::Bare => "bare",
            WireRevision::BarePort => "bare-port",
        };
        f.write_str(name)
    }
}

impl FromStr for WireRevision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sockaddr" => Ok(WireRevision::Sockaddr),
            "bare" => Ok(WireRevision::Bare),
            "bare-port" => Ok(WireRevision::BarePort),
            other => Err(format!(
                "unknown wire revision `{}` (expected sockaddr, bare or bare-port)",
                other
            )),
        }
    }
}

/// Encoder/decoder bound to one wire revision and family allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCodec {
    revision: WireRevision,
    families: FamilySet,
}

impl AddressCodec {
    /// Codec for `revision` accepting every compiled-in family.
    pub const fn new(revision: WireRevision) -> Self {
        Self {
            revision,
            families: FamilySet::compiled(),
        }
    }

    /// Narrow the accepted families.  Families not compiled in stay disabled.
    pub const fn with_families(mut self, families: FamilySet) -> Self {
        self.families = FamilySet::compiled().intersect(families);
        self
    }

    pub const fn revision(&self) -> WireRevision {
        self.revision
    }

    pub const fn families(&self) -> FamilySet {
        self.families
    }
}

impl Default for AddressCodec {
    fn default() -> Self {
        Self::new(WireRevision::default())
    }
}

/// Decode an address record with the default codec.
pub fn decode_address<C: WireContainer>(nvl: &C) -> Result<PeerAddress, DecodeError> {
    AddressCodec::default().decode_address(nvl)
}

/// Encode an address record with the default codec.
pub fn encode_address(addr: PeerAddress) -> Result<NvList, EncodeError> {
    AddressCodec::default().encode_address(addr)
}

/// Decode a status record with the default codec.
pub fn decode_status<C: WireContainer>(nvl: &C) -> Result<PeerStatus, DecodeError> {
    AddressCodec::default().decode_status(nvl)
}

/// Encode a status record with the default codec.
pub fn encode_status(status: &PeerStatus) -> Result<NvList, EncodeError> {
    AddressCodec::default().encode_status(status)
}

/// Fetch an optional field of one kind.  A value of another kind under the
/// same name is an error, not an absence.
fn optional<'a, C, T, F>(
    nvl: &'a C,
    field: &'static str,
    expected: ValueKind,
    get: F,
) -> Result<Option<T>, DecodeError>
where
    C: WireContainer,
    F: FnOnce(&'a C, &str) -> Option<T>,
{
    match get(nvl, field) {
        Some(value) => Ok(Some(value)),
        None if nvl.exists(field) => Err(DecodeError::WrongType { field, expected }),
        None => Ok(None),
    }
}

fn required<'a, C, T, F>(
    nvl: &'a C,
    field: &'static str,
    expected: ValueKind,
    get: F,
) -> Result<T, DecodeError>
where
    C: WireContainer,
    F: FnOnce(&'a C, &str) -> Option<T>,
{
    optional(nvl, field, expected, get)?.ok_or(DecodeError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_names() {
        for rev in [WireRevision::Sockaddr, WireRevision::Bare, WireRevision::BarePort] {
            assert_eq!(rev.to_string().parse::<WireRevision>(), Ok(rev));
        }
        assert!("v2".parse::<WireRevision>().is_err());
        assert_eq!(WireRevision::default(), WireRevision::BarePort);
    }

    #[test]
    fn test_revision_lengths() {
        assert_eq!(WireRevision::Sockaddr.address_len(AddressFamily::Inet), 16);
        assert_eq!(WireRevision::Sockaddr.address_len(AddressFamily::Inet6), 28);
        assert_eq!(WireRevision::Bare.address_len(AddressFamily::Inet), 4);
        assert_eq!(WireRevision::BarePort.address_len(AddressFamily::Inet6), 16);
    }

    #[test]
    fn test_optional_distinguishes_wrong_type() {
        let mut nvl = NvList::new();
        nvl.add_string("af", "inet");
        assert_eq!(
            optional(&nvl, "af", ValueKind::Number, NvList::get_number),
            Err(DecodeError::WrongType {
                field: "af",
                expected: ValueKind::Number
            })
        );
        assert_eq!(
            optional(&nvl, "port", ValueKind::Number, NvList::get_number),
            Ok(None)
        );
        assert_eq!(
            required(&nvl, "port", ValueKind::Number, NvList::get_number),
            Err(DecodeError::MissingField("port"))
        );
    }

    #[test]
    fn test_with_families_cannot_widen() {
        let codec = AddressCodec::default().with_families(FamilySet::NONE);
        assert!(codec.families().is_empty());
        let codec = AddressCodec::default().with_families(FamilySet::from_families([
            AddressFamily::Inet,
            AddressFamily::Inet6,
        ]));
        assert_eq!(codec.families(), FamilySet::compiled());
    }
}
