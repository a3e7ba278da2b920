//! Status record encode/decode.
//!
//! ```text
//! syncdev     string   sync interface, <= 15 bytes, may be empty
//! maxupdates  number   0..=255
//! flags       number   opaque StatusFlags bits
//! syncpeer    nvlist   address record, absent when no peer is set
//! ```

use super::{optional, AddressCodec};
use crate::container::{ValueKind, WireContainer};
use crate::error::{DecodeError, EncodeError};
use crate::types::{DeviceName, PeerStatus, StatusFlags};

impl AddressCodec {
    /// Decode a status record.  Absent fields keep their zero value; a
    /// failing `syncpeer` fails the whole record.
    pub fn decode_status<C: WireContainer>(&self, nvl: &C) -> Result<PeerStatus, DecodeError> {
        let mut status = PeerStatus::default();

        if let Some(name) = optional(nvl, "syncdev", ValueKind::String, C::get_string)? {
            status.sync_device_name = DeviceName::new(name)?;
        }

        if let Some(max) = optional(nvl, "maxupdates", ValueKind::Number, C::get_number)? {
            status.max_updates = u8::try_from(max).map_err(|_| DecodeError::RangeError {
                field: "maxupdates",
                value: max,
                max: u64::from(u8::MAX),
            })?;
        }

        if let Some(bits) = optional(nvl, "flags", ValueKind::Number, C::get_number)? {
            status.flags = StatusFlags::from_bits_retain(bits);
        }

        if let Some(peer) = optional(nvl, "syncpeer", ValueKind::Nvlist, C::get_nvlist)? {
            status.peer = Some(self.decode_address(peer)?);
        }

        Ok(status)
    }

    /// Encode a status record into a fresh container.
    pub fn encode_status<C: WireContainer>(&self, status: &PeerStatus) -> Result<C, EncodeError> {
        let peer = status
            .peer
            .map(|addr| self.encode_address::<C>(addr))
            .transpose()?;

        let mut nvl = C::new_empty();
        nvl.add_string("syncdev", status.sync_device_name.as_str());
        nvl.add_number("maxupdates", u64::from(status.max_updates));
        nvl.add_number("flags", status.flags.bits());
        if let Some(peer) = peer {
            nvl.add_nvlist("syncpeer", peer);
        }
        Ok(nvl)
    }
}
