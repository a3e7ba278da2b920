//! Wire codec for the pfsync status record.
//!
//! A pfsync interface reports its sync device, update batching, feature
//! flags and sync peer as a name/value list.  This crate converts between
//! that list and typed values:
//!
//! * [`codec`]: [`AddressCodec`] and the `decode_*` / `encode_*` entry points
//! * [`container`]: the [`WireContainer`] seam and the bundled [`NvList`]
//! * [`ops`]: ifconfig-style edits (`syncdev`, `syncpeer`, `maxupd`, `defer`)
//! * [`report`]: ifconfig-style status rendering
//! * [`store`]: status documents on disk

pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod ops;
pub mod report;
pub mod store;
pub mod types;

pub use codec::{
    decode_address, decode_status, encode_address, encode_status, AddressCodec, WireRevision,
};
pub use container::{NvList, NvValue, ValueKind, WireContainer};
pub use error::{CommandError, DecodeError, EncodeError, NameError};
pub use types::{AddressFamily, DeviceName, FamilySet, PeerAddress, PeerStatus, StatusFlags};
