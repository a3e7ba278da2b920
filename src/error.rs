//! Error types for the status codec.
//!
//! Every decode path returns exactly one [`DecodeError`]; nothing is logged
//! and no partially decoded value escapes.  Callers that need errno-style
//! codes map these at their own boundary.

use thiserror::Error;

use crate::container::ValueKind;

/// Failure while turning a container into a [`PeerAddress`] or
/// [`PeerStatus`].
///
/// [`PeerAddress`]: crate::types::PeerAddress
/// [`PeerStatus`]: crate::types::PeerStatus
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` has the wrong type: expected {expected}")]
    WrongType {
        field: &'static str,
        expected: ValueKind,
    },

    #[error("unsupported address family {0}")]
    UnsupportedFamily(u64),

    #[error("field `{field}` has size {actual}, expected {expected}")]
    SizeMismatch {
        field: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("field `{field}` value {value} out of range (max {max})")]
    RangeError {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("invalid sync device name: {0}")]
    InvalidDeviceName(#[from] NameError),
}

/// Failure while building a container from an in-memory value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("address family {0} is not enabled for encoding")]
    UnsupportedFamily(u64),
}

/// Rejected interface name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("`{name}` is {len} bytes long (max {max})")]
    TooLong { name: String, len: usize, max: usize },

    #[error("name contains a NUL byte")]
    EmbeddedNul,
}

/// Failure parsing or applying an ifconfig-style status command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`{0}` requires an argument")]
    MissingArgument(&'static str),

    #[error("maxupd {0}: out of range")]
    MaxUpdatesOutOfRange(String),

    #[error("error in parsing address string: {0}")]
    BadAddress(String),

    #[error("syncpeer address cannot be multicast")]
    MulticastPeer,

    #[error("syncpeer address {0} not supported")]
    UnsupportedPeer(String),

    #[error("invalid sync device name: {0}")]
    InvalidDeviceName(#[from] NameError),
}
