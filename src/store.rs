//! Status documents on disk.
//!
//! A document is the JSON form of the encoded status [`NvList`], so what is
//! stored is exactly what would go over the wire.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::codec::AddressCodec;
use crate::container::NvList;
use crate::types::{PeerStatus, DEFAULT_MAX_UPDATES};

/// Status of an interface nobody has configured yet.
pub fn initial_status() -> PeerStatus {
    PeerStatus {
        max_updates: DEFAULT_MAX_UPDATES,
        ..PeerStatus::default()
    }
}

/// Read the raw container document.  `None` if the file does not exist.
pub fn read_document(path: &Path) -> Result<Option<NvList>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };
    let nvl = serde_json::from_slice(&data)
        .with_context(|| format!("Malformed status document {}", path.display()))?;
    Ok(Some(nvl))
}

/// Load and decode a status; a missing file yields [`initial_status`].
pub fn load(path: &Path, codec: &AddressCodec) -> Result<PeerStatus> {
    match read_document(path)? {
        Some(nvl) => {
            debug!("Loaded {} fields from {}", nvl.len(), path.display());
            codec
                .decode_status(&nvl)
                .with_context(|| format!("Invalid status in {}", path.display()))
        }
        None => {
            info!("{} does not exist, starting from defaults", path.display());
            Ok(initial_status())
        }
    }
}

/// Encode `status` and write it to `path`.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it, so readers see either the old status or the new one.
pub fn save(path: &Path, status: &PeerStatus, codec: &AddressCodec) -> Result<()> {
    let nvl: NvList = codec
        .encode_status(status)
        .context("Failed to encode status")?;
    let mut json = serde_json::to_vec_pretty(&nvl)?;
    json.push(b'\n');

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(&json)
        .with_context(|| format!("Failed to write {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote status to {}", path.display());
    Ok(())
}
