//! Operator-facing rendering of a status, in the layout `ifconfig` prints
//! under a pfsync interface.

use std::fmt;
use std::net::IpAddr;

use crate::types::{PeerStatus, PFSYNC_GROUP};

/// Display adapter for a [`PeerStatus`].
///
/// ```text
/// 	syncdev: em0 syncpeer: 192.0.2.1 maxupd: 128 defer: off
/// 	syncok: 1
/// ```
pub struct StatusReport<'a>(pub &'a PeerStatus);

impl PeerStatus {
    pub fn report(&self) -> StatusReport<'_> {
        StatusReport(self)
    }
}

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.0;

        if !status.sync_device_name.is_empty() || status.peer.is_some() {
            f.write_str("\t")?;
        }
        if !status.sync_device_name.is_empty() {
            write!(f, "syncdev: {} ", status.sync_device_name)?;
        }
        if let Some(peer) = status.peer {
            // The default multicast group is implied, not configured.
            if peer.addr != IpAddr::V4(PFSYNC_GROUP) {
                write!(f, "syncpeer: {} ", peer)?;
            }
        }
        writeln!(
            f,
            "maxupd: {} defer: {}",
            status.max_updates,
            if status.defer() { "on" } else { "off" }
        )?;
        writeln!(f, "\tsyncok: {}", u8::from(status.sync_ok()))
    }
}
