//! Address record encode/decode.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::{optional, required, AddressCodec, WireRevision};
use crate::container::{ValueKind, WireContainer};
use crate::error::{DecodeError, EncodeError};
use crate::types::{AddressFamily, PeerAddress};

const SOCKADDR_IN_LEN: usize = 16;
const SOCKADDR_IN6_LEN: usize = 28;

pub(super) const fn sockaddr_len(family: AddressFamily) -> usize {
    match family {
        AddressFamily::Inet => SOCKADDR_IN_LEN,
        AddressFamily::Inet6 => SOCKADDR_IN6_LEN,
    }
}

impl AddressCodec {
    /// Decode an address record.
    ///
    /// The blob length is validated against the revision's canonical size
    /// before any byte is read out of it.
    pub fn decode_address<C: WireContainer>(&self, nvl: &C) -> Result<PeerAddress, DecodeError> {
        let code = required(nvl, "af", ValueKind::Number, C::get_number)?;
        let blob = required(nvl, "address", ValueKind::Binary, C::get_binary)?;

        let family = self
            .families
            .lookup(code)
            .ok_or(DecodeError::UnsupportedFamily(code))?;

        match self.revision {
            WireRevision::Sockaddr => decode_sockaddr(family, blob),
            WireRevision::Bare => Ok(PeerAddress::new(decode_bare(family, blob)?)),
            WireRevision::BarePort => {
                let addr = decode_bare(family, blob)?;
                let port = match optional(nvl, "port", ValueKind::Number, C::get_number)? {
                    Some(port) => u16::try_from(port).map_err(|_| DecodeError::SizeMismatch {
                        field: "port",
                        expected: u64::from(u16::MAX),
                        actual: port,
                    })?,
                    None => 0,
                };
                Ok(PeerAddress::with_port(addr, port))
            }
        }
    }

    /// Encode an address record into a fresh container.
    pub fn encode_address<C: WireContainer>(&self, addr: PeerAddress) -> Result<C, EncodeError> {
        let family = addr.family();
        if !self.families.contains(family) {
            return Err(EncodeError::UnsupportedFamily(family.code()));
        }

        let mut nvl = C::new_empty();
        nvl.add_number("af", family.code());
        match self.revision {
            WireRevision::Sockaddr => nvl.add_binary("address", &encode_sockaddr(addr)),
            WireRevision::Bare | WireRevision::BarePort => {
                nvl.add_binary("address", &encode_bare(addr.addr))
            }
        }
        if self.revision.has_port_key() && addr.port != 0 {
            nvl.add_number("port", u64::from(addr.port));
        }
        Ok(nvl)
    }
}

/// Copy `bytes` into a fixed array, failing on any length difference.
fn fixed<const N: usize>(field: &'static str, bytes: &[u8]) -> Result<[u8; N], DecodeError> {
    bytes.try_into().map_err(|_| DecodeError::SizeMismatch {
        field,
        expected: N as u64,
        actual: bytes.len() as u64,
    })
}

fn decode_bare(family: AddressFamily, blob: &[u8]) -> Result<IpAddr, DecodeError> {
    Ok(match family {
        AddressFamily::Inet => IpAddr::V4(Ipv4Addr::from(fixed::<4>("address", blob)?)),
        AddressFamily::Inet6 => IpAddr::V6(Ipv6Addr::from(fixed::<16>("address", blob)?)),
    })
}

fn encode_bare(addr: IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

// sockaddr_in:  len(1) family(1) port(2, BE) addr(4) zero(8)
// sockaddr_in6: len(1) family(1) port(2, BE) flowinfo(4) addr(16) scope_id(4)
fn decode_sockaddr(family: AddressFamily, blob: &[u8]) -> Result<PeerAddress, DecodeError> {
    match family {
        AddressFamily::Inet => {
            let raw = fixed::<SOCKADDR_IN_LEN>("address", blob)?;
            check_sockaddr_header(family, raw[0], raw[1])?;
            let port = u16::from_be_bytes([raw[2], raw[3]]);
            let addr = Ipv4Addr::new(raw[4], raw[5], raw[6], raw[7]);
            Ok(PeerAddress::with_port(IpAddr::V4(addr), port))
        }
        AddressFamily::Inet6 => {
            let raw = fixed::<SOCKADDR_IN6_LEN>("address", blob)?;
            check_sockaddr_header(family, raw[0], raw[1])?;
            let port = u16::from_be_bytes([raw[2], raw[3]]);
            let octets = fixed::<16>("address", &raw[8..24])?;
            Ok(PeerAddress::with_port(IpAddr::V6(Ipv6Addr::from(octets)), port))
        }
    }
}

fn check_sockaddr_header(family: AddressFamily, len: u8, af: u8) -> Result<(), DecodeError> {
    let expected = sockaddr_len(family) as u64;
    if u64::from(len) != expected {
        return Err(DecodeError::SizeMismatch {
            field: "address",
            expected,
            actual: u64::from(len),
        });
    }
    if u64::from(af) != family.code() {
        return Err(DecodeError::UnsupportedFamily(u64::from(af)));
    }
    Ok(())
}

fn encode_sockaddr(addr: PeerAddress) -> Vec<u8> {
    let family = addr.family();
    let mut out = vec![0u8; sockaddr_len(family)];
    out[0] = sockaddr_len(family) as u8;
    out[1] = family.code() as u8;
    out[2..4].copy_from_slice(&addr.port.to_be_bytes());
    match addr.addr {
        IpAddr::V4(v4) => out[4..8].copy_from_slice(&v4.octets()),
        IpAddr::V6(v6) => out[8..24].copy_from_slice(&v6.octets()),
    }
    out
}
