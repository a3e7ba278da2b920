use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::codec::{AddressCodec, WireRevision};
use crate::types::{AddressFamily, FamilySet};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Container document holding the status record.
    pub status_file: PathBuf,
    pub wire_revision: WireRevision,
    /// Families accepted on the wire; narrowed further by the build.
    pub families: Vec<AddressFamily>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            status_file: PathBuf::from("pfsync.json"),
            wire_revision: WireRevision::default(),
            families: vec![AddressFamily::Inet, AddressFamily::Inet6],
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("pfsyncctl.toml"))
            .merge(Json::file("pfsyncctl.json"))
            .merge(Env::prefixed("PFSYNCCTL_"))
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        // Make sure at least one family survives the build's allow-list
        config.codec()?;
        Ok(config)
    }

    /// Codec for the configured revision and families.
    pub fn codec(&self) -> anyhow::Result<AddressCodec> {
        let families = FamilySet::from_families(self.families.iter().copied());
        let codec = AddressCodec::new(self.wire_revision).with_families(families);
        if codec.families().is_empty() {
            anyhow::bail!(
                "No usable address family: configured {:?}, built with {:?}",
                self.families,
                FamilySet::compiled()
            );
        }
        Ok(codec)
    }
}
