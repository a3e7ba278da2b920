//! ifconfig-style edits of a [`PeerStatus`].
//!
//! Tokens are parsed the way `ifconfig pfsync0 ...` takes them:
//!
//! ```text
//! syncdev <if> | syncif <if> | -syncdev | -syncif
//! syncpeer <addr> | -syncpeer
//! maxupd <n>
//! defer | -defer
//! ```
//!
//! A command list is applied to a copy of the status; the caller only gets
//! the result if every command succeeded.

use std::net::IpAddr;

use log::debug;

use crate::error::CommandError;
use crate::types::{DeviceName, FamilySet, PeerAddress, PeerStatus, StatusFlags};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCommand {
    SetSyncDev(DeviceName),
    UnsetSyncDev,
    SetSyncPeer(IpAddr),
    UnsetSyncPeer,
    SetMaxUpdates(u8),
    SetDefer(bool),
}

impl StatusCommand {
    /// Parse a whole token list.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<StatusCommand>, CommandError> {
        let mut tokens = tokens.iter().map(|t| t.as_ref());
        let mut commands = Vec::new();
        while let Some(token) = tokens.next() {
            let command = match token {
                "syncdev" | "syncif" => {
                    let name = tokens.next().ok_or(CommandError::MissingArgument("syncdev"))?;
                    StatusCommand::SetSyncDev(DeviceName::new(name)?)
                }
                "-syncdev" | "-syncif" => StatusCommand::UnsetSyncDev,
                "syncpeer" => {
                    let addr = tokens.next().ok_or(CommandError::MissingArgument("syncpeer"))?;
                    StatusCommand::SetSyncPeer(parse_peer(addr)?)
                }
                "-syncpeer" => StatusCommand::UnsetSyncPeer,
                "maxupd" => {
                    let value = tokens.next().ok_or(CommandError::MissingArgument("maxupd"))?;
                    let max = value
                        .parse::<u8>()
                        .map_err(|_| CommandError::MaxUpdatesOutOfRange(value.to_string()))?;
                    StatusCommand::SetMaxUpdates(max)
                }
                "defer" => StatusCommand::SetDefer(true),
                "-defer" => StatusCommand::SetDefer(false),
                other => return Err(CommandError::Unknown(other.to_string())),
            };
            commands.push(command);
        }
        Ok(commands)
    }

    /// Apply this command to `status`.  Peers outside `families` are refused.
    pub fn apply(&self, status: &mut PeerStatus, families: FamilySet) -> Result<(), CommandError> {
        debug!("Applying {:?}", self);
        match self {
            StatusCommand::SetSyncDev(name) => status.sync_device_name = name.clone(),
            StatusCommand::UnsetSyncDev => status.sync_device_name = DeviceName::default(),
            StatusCommand::SetSyncPeer(addr) => {
                let peer = PeerAddress::new(*addr);
                if !families.contains(peer.family()) {
                    return Err(CommandError::UnsupportedPeer(addr.to_string()));
                }
                status.peer = Some(peer);
            }
            StatusCommand::UnsetSyncPeer => status.peer = None,
            StatusCommand::SetMaxUpdates(max) => status.max_updates = *max,
            StatusCommand::SetDefer(on) => status.flags.set(StatusFlags::DEFER, *on),
        }
        Ok(())
    }
}

/// Apply `commands` in order, all or nothing.
pub fn apply_all(
    status: &PeerStatus,
    commands: &[StatusCommand],
    families: FamilySet,
) -> Result<PeerStatus, CommandError> {
    let mut next = status.clone();
    for command in commands {
        command.apply(&mut next, families)?;
    }
    Ok(next)
}

fn parse_peer(s: &str) -> Result<IpAddr, CommandError> {
    let addr: IpAddr = s
        .parse()
        .map_err(|e| CommandError::BadAddress(format!("{}: {}", s, e)))?;
    if addr.is_multicast() {
        return Err(CommandError::MulticastPeer);
    }
    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AddressFamily;

    #[test]
    fn test_parse_full_line() {
        let commands = StatusCommand::parse_all(&[
            "syncdev", "em0", "syncpeer", "192.0.2.1", "maxupd", "64", "defer",
        ])
        .unwrap();
        assert_eq!(
            commands,
            vec![
                StatusCommand::SetSyncDev(DeviceName::new("em0").unwrap()),
                StatusCommand::SetSyncPeer("192.0.2.1".parse().unwrap()),
                StatusCommand::SetMaxUpdates(64),
                StatusCommand::SetDefer(true),
            ]
        );
    }

    #[test]
    fn test_parse_aliases_and_unsets() {
        let commands =
            StatusCommand::parse_all(&["syncif", "vlan10", "-syncif", "-syncpeer", "-defer"])
                .unwrap();
        assert_eq!(
            commands,
            vec![
                StatusCommand::SetSyncDev(DeviceName::new("vlan10").unwrap()),
                StatusCommand::UnsetSyncDev,
                StatusCommand::UnsetSyncPeer,
                StatusCommand::SetDefer(false),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            StatusCommand::parse_all(&["maxupd", "256"]),
            Err(CommandError::MaxUpdatesOutOfRange("256".into()))
        );
        assert_eq!(
            StatusCommand::parse_all(&["maxupd", "-1"]),
            Err(CommandError::MaxUpdatesOutOfRange("-1".into()))
        );
        assert_eq!(
            StatusCommand::parse_all(&["syncpeer"]),
            Err(CommandError::MissingArgument("syncpeer"))
        );
        assert_eq!(
            StatusCommand::parse_all(&["syncpeer", "224.0.0.240"]),
            Err(CommandError::MulticastPeer)
        );
        assert_eq!(
            StatusCommand::parse_all(&["syncpeer", "ff02::1"]),
            Err(CommandError::MulticastPeer)
        );
        assert!(matches!(
            StatusCommand::parse_all(&["syncpeer", "peer.example"]),
            Err(CommandError::BadAddress(_))
        ));
        assert!(matches!(
            StatusCommand::parse_all(&["syncdev", "this_name_is_too_long"]),
            Err(CommandError::InvalidDeviceName(_))
        ));
        assert_eq!(
            StatusCommand::parse_all(&["up"]),
            Err(CommandError::Unknown("up".into()))
        );
    }

    #[cfg(feature = "inet6")]
    #[test]
    fn test_apply_all() {
        let start = PeerStatus {
            flags: StatusFlags::OK,
            ..PeerStatus::default()
        };
        let commands = StatusCommand::parse_all(&[
            "syncdev", "em1", "syncpeer", "2001:db8::5", "defer", "maxupd", "0",
        ])
        .unwrap();
        let next = apply_all(&start, &commands, FamilySet::compiled()).unwrap();
        assert_eq!(next.sync_device_name.as_str(), "em1");
        assert_eq!(next.peer, Some(PeerAddress::new("2001:db8::5".parse().unwrap())));
        assert_eq!(next.max_updates, 0);
        assert_eq!(next.flags, StatusFlags::OK | StatusFlags::DEFER);

        let cleared = StatusCommand::parse_all(&["-defer", "-syncpeer", "-syncdev"]).unwrap();
        let next = apply_all(&next, &cleared, FamilySet::compiled()).unwrap();
        assert_eq!(next, start);
    }

    #[test]
    fn test_apply_all_is_atomic() {
        let start = PeerStatus::default();
        let commands =
            StatusCommand::parse_all(&["maxupd", "10", "syncpeer", "2001:db8::5"]).unwrap();
        let v4_only = FamilySet::from_families([AddressFamily::Inet]);
        assert_eq!(
            apply_all(&start, &commands, v4_only),
            Err(CommandError::UnsupportedPeer("2001:db8::5".into()))
        );
        assert_eq!(start.max_updates, 0);
    }
}
